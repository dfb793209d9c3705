use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::theme::Theme;

const HELP_KEYS: &[(&str, &str)] = &[
    ("r", "replay logo reveal"),
    ("R", "replay every reveal"),
    ("tab / l", "next button"),
    ("S-tab / h", "previous button"),
    ("enter", "select button"),
    ("c", "toggle flap cards"),
    ("?", "toggle this help"),
    ("q / esc", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let popup_area = centered_rect(44, HELP_KEYS.len() as u16 + 4, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.background));

        let lines: Vec<Line> = HELP_KEYS
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>10}", key),
                        Style::default().fg(theme.glyph).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", what), Style::default().fg(theme.text)),
                ])
            })
            .collect();

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);
        if inner.height < 2 {
            return;
        }
        frame.render_widget(
            Paragraph::new(lines),
            Rect {
                y: inner.y + 1,
                height: inner.height.saturating_sub(1),
                ..inner
            },
        );
    }
}
