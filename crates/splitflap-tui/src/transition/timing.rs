//! Time and interpolation helpers for transitions

use std::time::{Duration, Instant};

use ratatui::style::Color;

/// Progress (0.0 to 1.0) of a transition that started at `start`, measured at `now`
#[inline]
pub fn progress_at(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[inline]
fn lerp_u8(from: u8, to: u8, t: f64) -> u8 {
    lerp(from as f64, to as f64, t).round().clamp(0.0, 255.0) as u8
}

/// Blend two colors; non-RGB colors snap at the halfway point
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            Color::Rgb(lerp_u8(r1, r2, t), lerp_u8(g1, g2, t), lerp_u8(b1, b2, t))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(10.0, 20.0, 1.0) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress_at(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_at() {
        let start = Instant::now();
        let d = Duration::from_millis(200);
        assert!((progress_at(start, d, start + Duration::from_millis(50)) - 0.25).abs() < 0.001);
        assert_eq!(progress_at(start, d, start + Duration::from_secs(1)), 1.0);
        assert_eq!(progress_at(start + d, d, start), 0.0);
    }

    #[test]
    fn test_blend() {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);
        assert_eq!(blend(black, white, 0.0), black);
        assert_eq!(blend(black, white, 1.0), white);
        assert_eq!(blend(black, white, 0.5), Color::Rgb(128, 128, 128));
        assert_eq!(blend(Color::Red, Color::Blue, 0.2), Color::Red);
        assert_eq!(blend(Color::Red, Color::Blue, 0.8), Color::Blue);
    }
}
