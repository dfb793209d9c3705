//! Theme registry and loader

mod dracula;
mod ember;
mod gruvbox;
mod nord;

use ratatui::style::Color;
use splitflap_core::config::{ThemeColorOverrides, ThemeConfig};
use tracing::warn;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config, then apply color overrides
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "ember" | "ember-dark" => ember::dark(),
        "ember-light" => ember::light(),
        "gruvbox" | "gruvbox-dark" => gruvbox::dark(),
        "nord" => nord::nord(),
        "dracula" => dracula::dracula(),
        other => {
            warn!("Unknown theme '{}', using ember", other);
            ember::dark()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 8] = [
        (&overrides.background, &mut theme.background),
        (&overrides.card, &mut theme.card),
        (&overrides.seam, &mut theme.seam),
        (&overrides.glyph, &mut theme.glyph),
        (&overrides.scramble, &mut theme.scramble),
        (&overrides.text, &mut theme.text),
        (&overrides.muted, &mut theme.muted),
        (&overrides.accent, &mut theme.accent),
    ];

    for (value, slot) in slots {
        if let Some(hex) = value {
            match parse_hex_color(hex) {
                Some(color) => *slot = color,
                None => warn!("Ignoring invalid color override '{}'", hex),
            }
        }
    }

    theme
}

/// Names accepted by `load_theme`
pub fn available_themes() -> &'static [&'static str] {
    &["ember", "ember-light", "gruvbox-dark", "nord", "dracula"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#f97316").unwrap();
        assert!(matches!(color, Color::Rgb(0xf9, 0x73, 0x16)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.glyph, Color::Rgb(0xf9, 0x73, 0x16)));
    }

    #[test]
    fn test_load_theme_unknown_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            ..Default::default()
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.background, Color::Rgb(0x11, 0x11, 0x11)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                glyph: Some("#ff0000".to_string()),
                accent: Some("bogus".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.glyph, Color::Rgb(255, 0, 0)));
        assert!(matches!(theme.accent, Color::Rgb(0xeb, 0xcb, 0x8b)));
    }

    #[test]
    fn test_available_themes_load() {
        for name in available_themes() {
            let config = ThemeConfig {
                name: name.to_string(),
                ..Default::default()
            };
            let _ = load_theme(&config);
        }
    }
}
