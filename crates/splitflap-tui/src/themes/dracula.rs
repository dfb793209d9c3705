use ratatui::style::Color;

use crate::theme::Theme;

pub fn dracula() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x2a, 0x36),
        card: Color::Rgb(0x34, 0x37, 0x46),
        seam: Color::Rgb(0x44, 0x47, 0x5a),
        glyph: Color::Rgb(0xff, 0x79, 0xc6),
        scramble: Color::Rgb(0x62, 0x72, 0xa4),
        text: Color::Rgb(0xf8, 0xf8, 0xf2),
        muted: Color::Rgb(0x62, 0x72, 0xa4),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
    }
}
