//! Text effects
//!
//! Both effects are plain state machines advanced by `tick()`. Timing lives
//! in `crate::scheduler`, so the effects can be stepped by hand in tests or
//! by a render loop that owns its own clock.

pub mod charset;
pub mod cycler;
pub mod reveal;

pub use charset::CharPool;
pub use cycler::{CycleFrame, PeriodicCycler};
pub use reveal::{RevealBuilder, RevealFrame, ScrambleReveal};
