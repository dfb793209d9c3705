use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub card: Color,
    pub seam: Color,
    pub glyph: Color,
    pub scramble: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Orange glyphs on charcoal cards
        Self {
            background: Color::Rgb(0x11, 0x11, 0x11),
            card: Color::Rgb(0x1f, 0x1f, 0x1f),
            seam: Color::Rgb(0x2e, 0x2e, 0x2e),
            glyph: Color::Rgb(0xf9, 0x73, 0x16),
            scramble: Color::Rgb(0x9a, 0x4a, 0x12),
            text: Color::Rgb(0xe5, 0xe7, 0xeb),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            accent: Color::Rgb(0xfb, 0x92, 0x3c),
        }
    }
}
