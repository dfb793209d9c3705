use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme::default()
}

pub fn light() -> Theme {
    use ratatui::style::Color;
    Theme {
        background: Color::Rgb(0xfa, 0xfa, 0xf9),
        card: Color::Rgb(0x1c, 0x19, 0x17),
        seam: Color::Rgb(0x44, 0x40, 0x3c),
        glyph: Color::Rgb(0xf9, 0x73, 0x16),
        scramble: Color::Rgb(0xc2, 0x41, 0x0c),
        text: Color::Rgb(0x37, 0x41, 0x51),
        muted: Color::Rgb(0x9c, 0xa3, 0xaf),
        accent: Color::Rgb(0xea, 0x58, 0x0c),
    }
}
