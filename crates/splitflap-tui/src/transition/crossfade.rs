//! Crossfade controller for cycler text
//!
//! The outgoing item fades out over the first half of the transition and the
//! incoming item fades in over the second half, so only one string is ever
//! drawn at a time.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::progress_at;

#[derive(Debug, Clone)]
struct ActiveFade {
    start: Instant,
    outgoing: String,
}

/// Which string to draw and how visible it is
#[derive(Debug, Clone, PartialEq)]
pub struct FadeSample<'a> {
    pub text: &'a str,
    /// 0.0 invisible, 1.0 fully shown
    pub opacity: f64,
    /// True while the outgoing item is on screen
    pub leaving: bool,
}

#[derive(Debug, Clone)]
pub struct Crossfade {
    current: String,
    fade: Option<ActiveFade>,
    duration: Duration,
    easing: EasingType,
}

impl Crossfade {
    pub fn new(initial: impl Into<String>, duration: Duration, easing: EasingType) -> Self {
        Self {
            current: initial.into(),
            fade: None,
            duration,
            easing,
        }
    }

    /// Start fading from the shown item to `incoming`
    pub fn begin(&mut self, incoming: impl Into<String>) {
        self.begin_at(incoming, Instant::now());
    }

    pub fn begin_at(&mut self, incoming: impl Into<String>, now: Instant) {
        let incoming = incoming.into();
        if self.duration.is_zero() {
            self.current = incoming;
            self.fade = None;
            return;
        }
        let outgoing = std::mem::replace(&mut self.current, incoming);
        self.fade = Some(ActiveFade {
            start: now,
            outgoing,
        });
    }

    /// Jump to `text` without a transition
    pub fn set(&mut self, text: impl Into<String>) {
        self.current = text.into();
        self.fade = None;
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Check whether a fade is still running at `now`; clears a finished fade
    pub fn update_at(&mut self, now: Instant) -> bool {
        if let Some(ref fade) = self.fade {
            if now.saturating_duration_since(fade.start) >= self.duration {
                self.fade = None;
            }
        }
        self.fade.is_some()
    }

    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    pub fn sample(&self) -> FadeSample<'_> {
        self.sample_at(Instant::now())
    }

    pub fn sample_at(&self, now: Instant) -> FadeSample<'_> {
        let Some(ref fade) = self.fade else {
            return FadeSample {
                text: &self.current,
                opacity: 1.0,
                leaving: false,
            };
        };

        let t = progress_at(fade.start, self.duration, now);
        if t < 0.5 {
            FadeSample {
                text: &fade.outgoing,
                opacity: 1.0 - self.easing.apply(t * 2.0),
                leaving: true,
            }
        } else {
            FadeSample {
                text: &self.current,
                opacity: self.easing.apply((t - 0.5) * 2.0),
                leaving: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> Crossfade {
        Crossfade::new("A", Duration::from_millis(400), EasingType::Linear)
    }

    #[test]
    fn test_idle_is_opaque() {
        let fade = fade();
        let sample = fade.sample();
        assert_eq!(sample.text, "A");
        assert_eq!(sample.opacity, 1.0);
        assert!(!fade.is_animating());
    }

    #[test]
    fn test_fade_out_then_in() {
        let mut fade = fade();
        let start = Instant::now();
        fade.begin_at("B", start);

        let s = fade.sample_at(start + Duration::from_millis(100));
        assert_eq!(s.text, "A");
        assert!(s.leaving);
        assert!((s.opacity - 0.5).abs() < 0.01);

        let s = fade.sample_at(start + Duration::from_millis(300));
        assert_eq!(s.text, "B");
        assert!((s.opacity - 0.5).abs() < 0.01);

        let s = fade.sample_at(start + Duration::from_millis(400));
        assert_eq!(s.text, "B");
        assert_eq!(s.opacity, 1.0);
    }

    #[test]
    fn test_update_clears_finished_fade() {
        let mut fade = fade();
        let start = Instant::now();
        fade.begin_at("B", start);
        assert!(fade.update_at(start + Duration::from_millis(10)));
        assert!(!fade.update_at(start + Duration::from_millis(400)));
        assert!(!fade.is_animating());
        assert_eq!(fade.current(), "B");
    }

    #[test]
    fn test_zero_duration_switches_immediately() {
        let mut fade = Crossfade::new("A", Duration::ZERO, EasingType::Cubic);
        fade.begin("B");
        assert!(!fade.is_animating());
        assert_eq!(fade.sample().text, "B");
    }

    #[test]
    fn test_set_cancels_fade() {
        let mut fade = fade();
        fade.begin("B");
        fade.set("C");
        assert!(!fade.is_animating());
        assert_eq!(fade.sample().text, "C");
    }
}
