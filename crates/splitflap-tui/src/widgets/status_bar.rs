use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::FlapBoardWidget;
use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = if app.show_help { "HELP" } else { "LIVE" };
        let cards_str = if app.flap_cards { "cards" } else { "plain" };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} |{}", mode_str, msg)
        } else {
            format!(
                " {} | Effects: {} | Board: {} ({} rows)",
                mode_str,
                app.mounted_count(),
                cards_str,
                FlapBoardWidget::height(app.flap_cards)
            )
        };

        let help_hint = " q:quit r:replay tab:next enter:select ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.chars().count());

        let bar = Style::default().bg(theme.card);
        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(theme.text)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
