//! Crossfade transitions for cycler text
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and color interpolation helpers
//! - `crossfade` - fade controller combining the two
//!
//! # Usage
//!
//! ```ignore
//! use splitflap_tui::transition::Crossfade;
//!
//! let mut fade = Crossfade::new("Own Your Memory", duration, EasingType::EaseOut);
//! fade.begin("Connect All Agents");
//!
//! // each frame
//! let sample = fade.sample();
//! let color = blend(theme.background, theme.accent, sample.opacity);
//! ```

pub mod crossfade;
pub mod easing;
pub mod timing;

pub use crossfade::{Crossfade, FadeSample};
pub use easing::{EasingType, EasingTypeExt};
pub use timing::blend;
