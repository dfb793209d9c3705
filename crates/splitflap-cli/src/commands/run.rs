use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use splitflap_core::AppConfig;
use splitflap_tui::{
    app::{App, EffectUpdate},
    event::{AppEvent, EventHandler},
    input::{apply_action, handle_key_event},
    load_theme,
    widgets::{ButtonRowWidget, CyclerLineWidget, FlapBoardWidget, PopupWidget, StatusBarWidget},
};

const ACCENT_PREFIX: &str = "Context sharing across ";
const ACCENT_SUFFIX: &str = " and every agent you use.";

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Load theme from config
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("splitflap"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = match app.mount() {
        Ok(updates) => main_loop(&mut terminal, &mut app, &event_handler, updates),
        Err(e) => Err(e),
    };

    // Stop every timer before leaving the screen
    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Landing screen closed");
    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    mut updates: mpsc::UnboundedReceiver<EffectUpdate>,
) -> Result<()> {
    loop {
        // Apply frames produced by the effect timers (non-blocking)
        while let Ok(update) = updates.try_recv() {
            app.apply(update);
        }

        let animating = app.update();

        terminal.draw(|frame| draw(frame, app))?;

        if let Some(event) = event_handler.next(animating)? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    apply_action(app, action);
                }
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.background)), size);

    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    let board_height = FlapBoardWidget::height(app.flap_cards);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(board_height), // Logo
            Constraint::Length(1),
            Constraint::Length(1), // Tagline
            Constraint::Length(1),
            Constraint::Length(1), // Accent line
            Constraint::Length(1),
            Constraint::Length(1), // Buttons
            Constraint::Fill(1),
            Constraint::Length(1), // Footer
        ])
        .split(main_layout[0]);

    FlapBoardWidget::render(frame, rows[1], &app.logo, &app.theme, app.flap_cards);
    CyclerLineWidget::render(frame, rows[3], "", &app.tagline, "", &app.theme);
    CyclerLineWidget::render(frame, rows[5], ACCENT_PREFIX, &app.accent, ACCENT_SUFFIX, &app.theme);
    ButtonRowWidget::render(frame, rows[7], app);
    render_footer(frame, rows[9], app);
    StatusBarWidget::render(frame, main_layout[1], app);

    if app.show_help {
        PopupWidget::render_help(frame, &app.theme);
    }
}

/// Small inline logo, always drawn as plain text
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    FlapBoardWidget::render(frame, area, &app.inline, &app.theme, false);
}
