//! Periodic cycler: rotate through a fixed list of strings

use std::time::Duration;

use serde::Serialize;

use crate::{Error, Result};

pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// The item shown after a tick, plus the one it replaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleFrame {
    pub index: usize,
    pub text: String,
    /// Outgoing item, `None` on the first frame
    pub previous: Option<String>,
    /// Number of advances since the cycler was created
    pub tick: u64,
}

impl CycleFrame {
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone)]
pub struct PeriodicCycler {
    items: Vec<String>,
    current_index: usize,
    interval: Duration,
    transition: Duration,
    ticks: u64,
}

impl PeriodicCycler {
    /// Create a cycler starting at the first item
    pub fn new<I, S>(items: I, interval: Duration) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(Error::invalid("cycler needs at least one item"));
        }
        if interval.is_zero() {
            return Err(Error::invalid("cycle interval must be positive"));
        }

        Ok(Self {
            items,
            current_index: 0,
            interval,
            transition: DEFAULT_TRANSITION.min(interval / 2),
            ticks: 0,
        })
    }

    /// Set the crossfade duration; it must be shorter than the interval
    pub fn with_transition(mut self, transition: Duration) -> Result<Self> {
        if transition >= self.interval {
            return Err(Error::invalid(format!(
                "transition {:?} must be shorter than interval {:?}",
                transition, self.interval
            )));
        }
        self.transition = transition;
        Ok(self)
    }

    /// Advance to the next item, wrapping at the end
    pub fn tick(&mut self) -> CycleFrame {
        let previous = self.current_index;
        self.current_index = (self.current_index + 1) % self.items.len();
        self.ticks += 1;

        CycleFrame {
            index: self.current_index,
            text: self.items[self.current_index].clone(),
            previous: Some(self.items[previous].clone()),
            tick: self.ticks,
        }
    }

    /// Frame for the current item without advancing
    pub fn current(&self) -> CycleFrame {
        CycleFrame {
            index: self.current_index,
            text: self.items[self.current_index].clone(),
            previous: None,
            tick: self.ticks,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Length of the longest item in chars, for fixed-width layouts
    pub fn max_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.chars().count())
            .max()
            .unwrap_or(0)
    }
}
