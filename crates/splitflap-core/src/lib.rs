pub mod config;
pub mod effects;
pub mod error;
pub mod scheduler;

pub use config::{AppConfig, EasingType};
pub use effects::{CharPool, CycleFrame, PeriodicCycler, RevealFrame, ScrambleReveal};
pub use error::{Error, Result};
pub use scheduler::{spawn_cycler, spawn_reveal, EffectHandle, FrameSink};
