use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::CyclerView;
use crate::theme::Theme;
use crate::transition::blend;

/// One line of text with a crossfading cycler embedded in it
pub struct CyclerLineWidget;

impl CyclerLineWidget {
    /// `prefix` and `suffix` are static copy around the cycling word
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        prefix: &str,
        view: &CyclerView,
        suffix: &str,
        theme: &Theme,
    ) {
        let line = Self::line(prefix, view, suffix, theme);
        let paragraph = Paragraph::new(line).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn line<'a>(prefix: &'a str, view: &'a CyclerView, suffix: &'a str, theme: &Theme) -> Line<'a> {
        let sample = view.fade.sample();
        let color = blend(theme.background, theme.accent, sample.opacity);

        // Pad to the widest item so the surrounding copy stays put
        let pad = view.width.saturating_sub(sample.text.chars().count());
        let left = pad / 2;
        let right = pad - left;

        Line::from(vec![
            Span::styled(prefix, Style::default().fg(theme.text)),
            Span::raw(" ".repeat(left)),
            Span::styled(
                sample.text.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(right)),
            Span::styled(suffix, Style::default().fg(theme.text)),
        ])
    }
}
