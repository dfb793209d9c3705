use ratatui::style::Color;

use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x28, 0x28),
        card: Color::Rgb(0x32, 0x30, 0x2f),
        seam: Color::Rgb(0x45, 0x40, 0x3d),
        glyph: Color::Rgb(0xd8, 0xa6, 0x57),
        scramble: Color::Rgb(0x92, 0x83, 0x74),
        text: Color::Rgb(0xd4, 0xbe, 0x98),
        muted: Color::Rgb(0x7c, 0x6f, 0x64),
        accent: Color::Rgb(0xe7, 0x8a, 0x4e),
    }
}
