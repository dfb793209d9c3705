use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    /// Poll at `tick_rate_ms` when idle and at `fps` while something animates
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        let animation_tick = if fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis((1000 / fps as u64).max(1))
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_tick,
        }
    }

    pub fn poll_interval(&self, animating: bool) -> Duration {
        if animating {
            self.animation_tick.min(self.tick_rate)
        } else {
            self.tick_rate
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        if event::poll(self.poll_interval(animating))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic redraws
    Tick,
}
