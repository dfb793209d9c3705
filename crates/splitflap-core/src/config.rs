use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::effects::{CharPool, PeriodicCycler, ScrambleReveal};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub cycler: CyclerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Input poll / idle redraw interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Redraw rate while a crossfade is in progress
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Draw split-flap cards around logo glyphs
    #[serde(default = "default_true")]
    pub flap_cards: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            flap_cards: default_true(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "ember", "gruvbox-dark")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either `theme = "nord"` or `[ui.theme]` with name/colors
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a table with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "ember".to_string()
}

/// Optional color overrides, each a hex string ("#f97316" or "f97316")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Screen background
    pub background: Option<String>,
    /// Flap card face
    pub card: Option<String>,
    /// Horizontal split line across a card
    pub seam: Option<String>,
    /// Glyphs that have locked in
    pub glyph: Option<String>,
    /// Glyphs still scrambling
    pub scramble: Option<String>,
    /// Body text
    pub text: Option<String>,
    /// Dimmed text
    pub muted: Option<String>,
    /// Accent (cycler text, borders)
    pub accent: Option<String>,
}

/// Easing curve for crossfades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    #[serde(alias = "ease-out", alias = "ease_out")]
    EaseOut,
}

/// Timing and glyph settings for one reveal instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealPreset {
    pub text: String,
    #[serde(default = "default_step_interval")]
    pub step_interval_ms: u64,
    /// Derived from the text length when absent
    #[serde(default)]
    pub max_steps: Option<u32>,
    #[serde(default = "default_lock_in_factor")]
    pub lock_in_factor: u32,
    /// Preset name ("morph", "alnum", ...) or a literal set of characters
    #[serde(default = "default_char_pool")]
    pub char_pool: String,
    #[serde(default)]
    pub initial_delay_ms: u64,
    /// Restart interval; absent means run once per trigger
    #[serde(default)]
    pub retrigger_interval_ms: Option<u64>,
    /// Start without waiting for a trigger
    #[serde(default = "default_true")]
    pub auto_start: bool,
}

impl RevealPreset {
    /// Build a reveal from this preset
    pub fn to_reveal(&self) -> crate::Result<ScrambleReveal> {
        let mut builder = ScrambleReveal::builder(self.text.clone())
            .step_interval(Duration::from_millis(self.step_interval_ms))
            .lock_in_factor(self.lock_in_factor)
            .char_pool(CharPool::from_spec(&self.char_pool)?)
            .initial_delay(Duration::from_millis(self.initial_delay_ms))
            .retrigger_interval(self.retrigger_interval_ms.map(Duration::from_millis))
            .auto_start(self.auto_start);
        if let Some(steps) = self.max_steps {
            builder = builder.max_steps(steps);
        }
        builder.build()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Large flap-board logo
    #[serde(default = "default_logo_reveal")]
    pub logo: RevealPreset,
    /// Inline logo in the footer line
    #[serde(default = "default_inline_reveal")]
    pub inline: RevealPreset,
    /// Call-to-action labels, scrambled on demand
    #[serde(default = "default_button_reveals")]
    pub buttons: Vec<RevealPreset>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            logo: default_logo_reveal(),
            inline: default_inline_reveal(),
            buttons: default_button_reveals(),
        }
    }
}

/// Settings for one cycler instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclerPreset {
    pub items: Vec<String>,
    #[serde(default = "default_cycle_interval")]
    pub interval_ms: u64,
    /// Crossfade length; absent means min(500 ms, interval / 2)
    #[serde(default)]
    pub transition_ms: Option<u64>,
    #[serde(default)]
    pub easing: EasingType,
}

impl CyclerPreset {
    /// Build a cycler from this preset
    pub fn to_cycler(&self) -> crate::Result<PeriodicCycler> {
        let cycler =
            PeriodicCycler::new(self.items.iter().cloned(), Duration::from_millis(self.interval_ms))?;
        match self.transition_ms {
            Some(ms) => cycler.with_transition(Duration::from_millis(ms)),
            None => Ok(cycler),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclerConfig {
    /// Headline phrases under the logo
    #[serde(default = "default_tagline_cycler")]
    pub tagline: CyclerPreset,
    /// Accent word inside the body copy
    #[serde(default = "default_accent_cycler")]
    pub accent: CyclerPreset,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            tagline: default_tagline_cycler(),
            accent: default_accent_cycler(),
        }
    }
}

fn default_logo_reveal() -> RevealPreset {
    RevealPreset {
        text: "DeMapp".to_string(),
        step_interval_ms: 50,
        max_steps: Some(15),
        lock_in_factor: default_lock_in_factor(),
        char_pool: default_char_pool(),
        initial_delay_ms: 500,
        retrigger_interval_ms: Some(5000),
        auto_start: true,
    }
}

fn default_inline_reveal() -> RevealPreset {
    RevealPreset {
        text: "DeMapp".to_string(),
        step_interval_ms: 40,
        max_steps: Some(12),
        lock_in_factor: default_lock_in_factor(),
        char_pool: default_char_pool(),
        initial_delay_ms: 300,
        retrigger_interval_ms: Some(6000),
        auto_start: true,
    }
}

fn default_button_reveals() -> Vec<RevealPreset> {
    ["Get Started", "Learn More"]
        .into_iter()
        .map(|label| RevealPreset {
            text: label.to_string(),
            step_interval_ms: 25,
            max_steps: None,
            lock_in_factor: default_lock_in_factor(),
            char_pool: "upper".to_string(),
            initial_delay_ms: 0,
            retrigger_interval_ms: None,
            auto_start: false,
        })
        .collect()
}

fn default_tagline_cycler() -> CyclerPreset {
    CyclerPreset {
        items: [
            "Own Your Memory",
            "Connect All Agents",
            "Never Lose Context",
            "Build Intelligence",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        interval_ms: 2500,
        transition_ms: Some(300),
        easing: EasingType::EaseOut,
    }
}

fn default_accent_cycler() -> CyclerPreset {
    CyclerPreset {
        items: ["ChatGPT", "Claude", "Cursor", "Copilot", "Custom Agents"]
            .into_iter()
            .map(String::from)
            .collect(),
        interval_ms: 2000,
        transition_ms: Some(300),
        easing: EasingType::EaseOut,
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("splitflap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_step_interval() -> u64 {
    50
}

fn default_lock_in_factor() -> u32 {
    2
}

fn default_char_pool() -> String {
    "morph".to_string()
}

fn default_cycle_interval() -> u64 {
    3000
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/splitflap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("splitflap")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("splitflap.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Build every configured effect once, surfacing the first invalid preset
    pub fn validate(&self) -> crate::Result<()> {
        self.reveal.logo.to_reveal()?;
        self.reveal.inline.to_reveal()?;
        for button in &self.reveal.buttons {
            button.to_reveal()?;
        }
        self.cycler.tagline.to_cycler()?;
        self.cycler.accent.to_cycler()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.reveal.logo, default_logo_reveal());
        assert_eq!(config.cycler.tagline.items.len(), 4);
        assert_eq!(config.ui.theme.name, "ember");
        config.validate().unwrap();
    }

    #[test]
    fn test_defaults_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.reveal.buttons, config.reveal.buttons);
        assert_eq!(parsed.cycler.accent, config.cycler.accent);
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"gruvbox-dark\"\n[ui.theme.colors]\nglyph = \"#ff0000\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "gruvbox-dark");
        assert_eq!(config.ui.theme.colors.glyph.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_partial_preset_uses_field_defaults() {
        let config = AppConfig::from_toml(
            "[reveal.logo]\ntext = \"HELLO\"\n\n[cycler.tagline]\nitems = [\"a\", \"b\"]\neasing = \"linear\"\n",
        )
        .unwrap();
        let reveal = config.reveal.logo.to_reveal().unwrap();
        assert_eq!(reveal.target_string(), "HELLO");
        assert_eq!(reveal.step_interval(), Duration::from_millis(50));
        assert_eq!(reveal.retrigger_interval(), None);

        let cycler = config.cycler.tagline.to_cycler().unwrap();
        assert_eq!(cycler.interval(), Duration::from_millis(3000));
        assert_eq!(config.cycler.tagline.easing, EasingType::Linear);
    }

    #[test]
    fn test_short_interval_derives_transition() {
        let config =
            AppConfig::from_toml("[cycler.accent]\nitems = [\"a\", \"b\"]\ninterval_ms = 400\n")
                .unwrap();
        assert_eq!(config.cycler.accent.transition_ms, None);
        config.validate().unwrap();
        let cycler = config.cycler.accent.to_cycler().unwrap();
        assert_eq!(cycler.transition(), Duration::from_millis(200));

        let config = AppConfig::from_toml(
            "[cycler.accent]\nitems = [\"a\"]\ninterval_ms = 400\ntransition_ms = 400\n",
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_invalid_preset_reported() {
        let config =
            AppConfig::from_toml("[cycler.accent]\nitems = []\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));

        let config = AppConfig::from_toml("[reveal.logo]\ntext = \"\"\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(AppConfig::from_toml("[ui"), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join(format!("splitflap-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.ui.tick_rate_ms = 42;

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.ui.tick_rate_ms, 42);

        std::fs::remove_dir_all(&dir).unwrap();
        let missing = AppConfig::load_from(&path).unwrap();
        assert_eq!(missing.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_expand_tilde() {
        let plain = PathBuf::from("/tmp/splitflap");
        assert_eq!(expand_tilde(&plain), plain);
    }
}
