use ratatui::style::Color;

use crate::theme::Theme;

pub fn nord() -> Theme {
    Theme {
        background: Color::Rgb(0x2e, 0x34, 0x40),
        card: Color::Rgb(0x3b, 0x42, 0x52),
        seam: Color::Rgb(0x43, 0x4c, 0x5e),
        glyph: Color::Rgb(0x88, 0xc0, 0xd0),
        scramble: Color::Rgb(0x5e, 0x81, 0xac),
        text: Color::Rgb(0xec, 0xef, 0xf4),
        muted: Color::Rgb(0x4c, 0x56, 0x6a),
        accent: Color::Rgb(0xeb, 0xcb, 0x8b),
    }
}
