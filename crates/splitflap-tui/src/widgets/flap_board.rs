use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::centered_rect;
use crate::app::RevealView;
use crate::theme::Theme;

/// Columns per card, excluding the gap
const CARD_WIDTH: u16 = 5;
const CARD_GAP: u16 = 1;
const CARD_HEIGHT: u16 = 3;

/// Split-flap board: one card per glyph of a reveal
pub struct FlapBoardWidget;

impl FlapBoardWidget {
    /// Height the board needs
    pub fn height(cards: bool) -> u16 {
        if cards {
            CARD_HEIGHT
        } else {
            1
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, view: &RevealView, theme: &Theme, cards: bool) {
        let glyphs: Vec<char> = view.frame.text.chars().collect();
        let board_width = board_width(glyphs.len());

        if !cards || board_width > area.width || area.height < CARD_HEIGHT {
            Self::render_plain(frame, area, view, theme);
            return;
        }

        let board = centered_rect(board_width, CARD_HEIGHT, area);
        let card_style = Style::default().bg(theme.card);

        let mut top = Vec::new();
        let mut middle = Vec::new();
        let mut bottom = Vec::new();
        for (i, &glyph) in glyphs.iter().enumerate() {
            if i > 0 {
                let gap = " ".repeat(CARD_GAP as usize);
                top.push(Span::raw(gap.clone()));
                middle.push(Span::raw(gap.clone()));
                bottom.push(Span::raw(gap));
            }

            // Wide glyphs take two columns of the card
            let glyph_width = glyph.width().unwrap_or(1).clamp(1, 2) as u16;
            let left = (CARD_WIDTH - glyph_width) / 2;
            let right = CARD_WIDTH - glyph_width - left;

            top.push(Span::styled(" ".repeat(CARD_WIDTH as usize), card_style));
            middle.push(Span::styled(" ".repeat(left as usize), card_style));
            middle.push(Span::styled(glyph.to_string(), glyph_style(view, i, theme)));
            middle.push(Span::styled(" ".repeat(right as usize), card_style));
            bottom.push(Span::styled(
                "─".repeat(CARD_WIDTH as usize),
                card_style.fg(theme.seam),
            ));
        }

        let paragraph = Paragraph::new(vec![
            Line::from(top),
            Line::from(middle),
            Line::from(bottom),
        ]);
        frame.render_widget(paragraph, board);
    }

    fn render_plain(frame: &mut Frame, area: Rect, view: &RevealView, theme: &Theme) {
        let spans: Vec<Span> = view
            .frame
            .text
            .chars()
            .enumerate()
            .map(|(i, glyph)| Span::styled(glyph.to_string(), glyph_style(view, i, theme)))
            .collect();
        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(paragraph, Rect { height: area.height.min(1), ..area });
    }
}

/// Columns needed for `count` cards, saturating for absurdly long text
fn board_width(count: usize) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    count
        .saturating_mul(CARD_WIDTH + CARD_GAP)
        .saturating_sub(CARD_GAP.min(count))
}

fn glyph_style(view: &RevealView, index: usize, theme: &Theme) -> Style {
    if view.is_locked(index) {
        Style::default()
            .fg(theme.glyph)
            .bg(theme.card)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.scramble).bg(theme.card)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};
    use splitflap_core::RevealFrame;

    use super::*;

    fn view(text: &str, locked: usize) -> RevealView {
        RevealView {
            frame: RevealFrame {
                text: text.to_string(),
                step: 1,
                locked,
                finished: false,
            },
        }
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_cards_render_each_glyph() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| FlapBoardWidget::render(f, f.area(), &view("DEMO", 2), &theme, true))
            .unwrap();

        let middle = row(&terminal, 1);
        let glyphs: String = middle.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(glyphs, "DEMO");
        assert!(row(&terminal, 2).contains("─────"));
    }

    #[test]
    fn test_narrow_area_falls_back_to_plain() {
        let mut terminal = Terminal::new(TestBackend::new(8, 3)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| FlapBoardWidget::render(f, f.area(), &view("DEMAPP", 6), &theme, true))
            .unwrap();
        assert!(row(&terminal, 0).contains("DEMAPP"));
    }

    #[test]
    fn test_board_width_saturates() {
        assert_eq!(board_width(0), 0);
        assert_eq!(board_width(4), 23);
        assert_eq!(board_width(20_000), u16::MAX - 1);
        assert_eq!(board_width(usize::MAX), u16::MAX - 1);
    }

    #[test]
    fn test_long_text_falls_back_to_plain() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let theme = Theme::default();
        let text = "x".repeat(12_000);
        terminal
            .draw(|f| FlapBoardWidget::render(f, f.area(), &view(&text, 0), &theme, true))
            .unwrap();
        assert!(row(&terminal, 0).contains("xxxx"));
    }

    #[test]
    fn test_locked_glyphs_are_bold() {
        let theme = Theme::default();
        let v = view("AB", 1);
        assert!(glyph_style(&v, 0, &theme).add_modifier.contains(Modifier::BOLD));
        assert!(!glyph_style(&v, 1, &theme).add_modifier.contains(Modifier::BOLD));
    }
}
