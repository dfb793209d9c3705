use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Row of call-to-action labels; the selected one is scrambled on focus
pub struct ButtonRowWidget;

impl ButtonRowWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mut spans = Vec::new();

        for (i, view) in app.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }

            let selected = i == app.selected_button;
            let bracket = if selected {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };

            spans.push(Span::styled("[ ", bracket));
            for (pos, glyph) in view.frame.text.chars().enumerate() {
                let style = if !view.is_locked(pos) {
                    Style::default().fg(theme.scramble)
                } else if selected {
                    Style::default().fg(theme.glyph).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                spans.push(Span::styled(glyph.to_string(), style));
            }
            spans.push(Span::styled(" ]", bracket));
        }

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
