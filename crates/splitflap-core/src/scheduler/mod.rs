//! Timer drivers for text effects
//!
//! Every mounted effect gets its own tokio task, emission gate and command
//! channel; nothing is shared between instances. The returned
//! [`EffectHandle`] is the only way to reach the task, and dropping it tears
//! the effect down.

mod handle;
mod service;
mod sink;

pub use handle::{EffectHandle, EffectKind};
pub use service::{spawn_cycler, spawn_reveal};
pub use sink::{ChannelSink, FrameSink};
