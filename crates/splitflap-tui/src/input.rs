use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    RetriggerLogo,
    RetriggerAll,
    NextButton,
    PrevButton,
    ActivateButton,
    ToggleCards,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.show_help {
        // Any key closes help, but quit still quits
        return match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
            _ => Action::ExitMode,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::RetriggerLogo,
        (KeyCode::Char('R'), _) => Action::RetriggerAll,

        (KeyCode::Tab, _) | (KeyCode::Right, _) => Action::NextButton,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextButton,
        (KeyCode::BackTab, _) | (KeyCode::Left, _) => Action::PrevButton,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevButton,
        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => Action::ActivateButton,

        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::ToggleCards,
        (KeyCode::Char('?'), _) => Action::ToggleHelp,

        _ => Action::None,
    }
}

/// Apply an action to the app
pub fn apply_action(app: &mut App, action: Action) {
    use crate::app::Slot;

    match action {
        Action::Quit => app.should_quit = true,
        Action::RetriggerLogo => app.trigger(Slot::Logo),
        Action::RetriggerAll => {
            app.trigger(Slot::Logo);
            app.trigger(Slot::Inline);
            for i in 0..app.buttons.len() {
                app.trigger(Slot::Button(i));
            }
        }
        Action::NextButton => app.select_next_button(),
        Action::PrevButton => app.select_prev_button(),
        Action::ActivateButton => app.activate_selected_button(),
        Action::ToggleCards => app.toggle_cards(),
        Action::ToggleHelp => app.show_help = !app.show_help,
        Action::ExitMode => app.show_help = false,
        Action::None => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState};
    use splitflap_core::AppConfig;

    use super::*;
    use crate::theme::Theme;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap()
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('r'), KeyModifiers::NONE), &app), Action::RetriggerLogo);
        assert_eq!(handle_key_event(key(KeyCode::Char('R'), KeyModifiers::SHIFT), &app), Action::RetriggerAll);
        assert_eq!(handle_key_event(key(KeyCode::Tab, KeyModifiers::NONE), &app), Action::NextButton);
        assert_eq!(handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE), &app), Action::ActivateButton);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE), &app), Action::None);
    }

    #[test]
    fn test_help_mode_closes_on_any_key() {
        let mut app = app();
        apply_action(&mut app, Action::ToggleHelp);
        assert!(app.show_help);
        let action = handle_key_event(key(KeyCode::Char('r'), KeyModifiers::NONE), &app);
        assert_eq!(action, Action::ExitMode);
        apply_action(&mut app, action);
        assert!(!app.show_help);
    }

    #[test]
    fn test_apply_actions_without_mounted_effects() {
        let mut app = app();
        let cards = app.flap_cards;
        apply_action(&mut app, Action::ToggleCards);
        assert_eq!(app.flap_cards, !cards);
        apply_action(&mut app, Action::RetriggerAll);
        apply_action(&mut app, Action::ActivateButton);
        assert_eq!(app.status_message.as_deref(), Some(" Get Started "));
        apply_action(&mut app, Action::Quit);
        assert!(app.should_quit);
    }
}
