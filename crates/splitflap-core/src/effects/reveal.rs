//! Scramble reveal: random glyphs that resolve into a target string left to right
//!
//! `ScrambleReveal` is a pure state machine. It knows nothing about timers;
//! the driver in `crate::scheduler` calls `start()` and `tick()` on schedule.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::charset::CharPool;
use crate::{Error, Result};

/// Ticks between neighbouring positions locking in
pub const DEFAULT_LOCK_IN_FACTOR: u32 = 2;

/// Extra ticks after the last position locks before the run ends
pub const DEFAULT_SETTLE_STEPS: u32 = 4;

pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(50);

/// One rendered state of a reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealFrame {
    /// Text currently displayed (same char count as the target)
    pub text: String,
    /// Step counter after this tick (0 when idle)
    pub step: u32,
    /// Number of leading positions already locked to the target
    pub locked: usize,
    /// True on the frame that ends a run
    pub finished: bool,
}

impl RevealFrame {
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builder for [`ScrambleReveal`]
#[derive(Debug, Clone)]
pub struct RevealBuilder {
    target: String,
    step_interval: Duration,
    max_steps: Option<u32>,
    lock_in_factor: u32,
    char_pool: Option<CharPool>,
    retrigger_interval: Option<Duration>,
    initial_delay: Duration,
    auto_start: bool,
    seed: Option<u64>,
}

impl RevealBuilder {
    pub fn step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    pub fn max_steps(mut self, steps: u32) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn lock_in_factor(mut self, factor: u32) -> Self {
        self.lock_in_factor = factor;
        self
    }

    pub fn char_pool(mut self, pool: CharPool) -> Self {
        self.char_pool = Some(pool);
        self
    }

    /// Restart the whole run this long after each run finishes
    pub fn retrigger_interval(mut self, interval: Option<Duration>) -> Self {
        self.retrigger_interval = interval;
        self
    }

    /// Delay before the first run when driven by a scheduler
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// When false a scheduler waits for an explicit trigger before the first run
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Seed the filler RNG (deterministic output, mostly for tests)
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<ScrambleReveal> {
        let target: Vec<char> = self.target.chars().collect();
        if target.is_empty() {
            return Err(Error::invalid("reveal target must not be empty"));
        }
        if self.step_interval.is_zero() {
            return Err(Error::invalid("step interval must be positive"));
        }
        if self.lock_in_factor == 0 {
            return Err(Error::invalid("lock-in factor must be positive"));
        }
        if matches!(self.retrigger_interval, Some(d) if d.is_zero()) {
            return Err(Error::invalid("retrigger interval must be positive"));
        }

        // Last position locks once step_count > (len - 1) * factor
        let last_lock = u32::try_from(target.len() - 1)
            .ok()
            .and_then(|last| last.checked_mul(self.lock_in_factor))
            .ok_or_else(|| {
                Error::invalid(format!(
                    "{} positions with lock-in factor {} exceed the step counter",
                    target.len(),
                    self.lock_in_factor
                ))
            })?;
        let max_steps = match self.max_steps {
            Some(0) => return Err(Error::invalid("max steps must be positive")),
            // The finishing tick needs step_count > max_steps
            Some(u32::MAX) => return Err(Error::invalid("max steps out of range")),
            Some(steps) if steps <= last_lock => {
                return Err(Error::invalid(format!(
                    "max steps {} too small to lock {} positions (need more than {})",
                    steps,
                    target.len(),
                    last_lock
                )));
            }
            Some(steps) => steps,
            None => last_lock
                .checked_add(1 + DEFAULT_SETTLE_STEPS)
                .ok_or_else(|| {
                    Error::invalid(format!(
                        "lock-in factor {} leaves no room for settle steps",
                        self.lock_in_factor
                    ))
                })?,
        };

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(ScrambleReveal {
            displayed: target.clone(),
            target,
            step_count: 0,
            running: false,
            max_steps,
            lock_in_factor: self.lock_in_factor,
            step_interval: self.step_interval,
            retrigger_interval: self.retrigger_interval,
            initial_delay: self.initial_delay,
            auto_start: self.auto_start,
            pool: self.char_pool.unwrap_or_default(),
            rng,
        })
    }
}

/// Scramble/reveal state for a single instance
///
/// While idle the resolved target is displayed. `start()` begins a run;
/// every `tick()` then advances the step counter and redraws every position
/// that has not locked yet. Position `i` locks once `step > i * lock_in_factor`.
#[derive(Debug, Clone)]
pub struct ScrambleReveal {
    target: Vec<char>,
    displayed: Vec<char>,
    step_count: u32,
    running: bool,
    max_steps: u32,
    lock_in_factor: u32,
    step_interval: Duration,
    retrigger_interval: Option<Duration>,
    initial_delay: Duration,
    auto_start: bool,
    pool: CharPool,
    rng: StdRng,
}

impl ScrambleReveal {
    pub fn builder(target: impl Into<String>) -> RevealBuilder {
        RevealBuilder {
            target: target.into(),
            step_interval: DEFAULT_STEP_INTERVAL,
            max_steps: None,
            lock_in_factor: DEFAULT_LOCK_IN_FACTOR,
            char_pool: None,
            retrigger_interval: None,
            initial_delay: Duration::ZERO,
            auto_start: true,
            seed: None,
        }
    }

    /// Reveal with default timing that runs once
    pub fn new(target: impl Into<String>) -> Result<Self> {
        Self::builder(target).build()
    }

    /// Begin (or restart) a run from step 0
    pub fn start(&mut self) {
        self.step_count = 0;
        self.running = true;
    }

    /// Advance one step and return the resulting frame
    ///
    /// Ticking an idle instance returns the resolved target unchanged.
    pub fn tick(&mut self) -> RevealFrame {
        if !self.running {
            return self.frame(false);
        }

        self.step_count += 1;
        if self.step_count > self.max_steps {
            self.finish();
            return self.frame(true);
        }

        for i in 0..self.target.len() {
            self.displayed[i] = if self.is_locked(i) {
                self.target[i]
            } else {
                // Never show the right glyph before its slot locks
                self.pool.pick_except(&mut self.rng, self.target[i])
            };
        }

        self.frame(false)
    }

    /// Stop the current run and show the target
    pub fn finish(&mut self) {
        self.displayed.copy_from_slice(&self.target);
        self.running = false;
    }

    /// Whether position `index` has locked to its target character
    pub fn is_locked(&self, index: usize) -> bool {
        if !self.running {
            return index < self.target.len();
        }
        u64::from(self.step_count) > index as u64 * u64::from(self.lock_in_factor)
    }

    /// Count of positions locked (always a prefix)
    pub fn locked_count(&self) -> usize {
        (0..self.target.len())
            .take_while(|&i| self.is_locked(i))
            .count()
    }

    /// Current frame without advancing
    pub fn current(&self) -> RevealFrame {
        self.frame(false)
    }

    fn frame(&self, finished: bool) -> RevealFrame {
        RevealFrame {
            text: self.displayed.iter().collect(),
            step: if self.running { self.step_count } else { 0 },
            locked: self.locked_count(),
            finished,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn target_string(&self) -> String {
        self.target.iter().collect()
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn retrigger_interval(&self) -> Option<Duration> {
        self.retrigger_interval
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }
}
