//! Progress projection
//!
//! Converts raw output time values into display values, and pointer
//! positions on the seek/volume bars back into fractions.

use serde::{Deserialize, Serialize};

/// Which bar a pointer interaction landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Seek bar; the fraction becomes a seek command
    Seek,
    /// Volume bar; the fraction becomes the new volume
    Volume,
}

/// Playback progress in percent
///
/// Returns 0 until the duration is known.
pub fn progress_percent(position_secs: f64, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 && position_secs.is_finite() {
        (position_secs / duration_secs * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Format seconds as `M:SS`
///
/// Minutes are not wrapped into hours, so an hour and a bit reads `61:01`.
/// Negative and non-finite input formats as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };

    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// Fraction of a bar under the pointer, clamped to [0, 1]
///
/// A zero, negative or non-finite bar width yields 0.
pub fn fraction_from_pointer(pointer_x: f64, rect_left: f64, rect_width: f64) -> f64 {
    if !(rect_width.is_finite() && rect_width > 0.0) {
        return 0.0;
    }

    let fraction = (pointer_x - rect_left) / rect_width;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Clamp a fraction to [0, 1], mapping NaN to 0
pub(crate) fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_boundaries() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(3661.0), "61:01");
    }

    #[test]
    fn format_time_floors_fractions() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(61.5), "1:01");
    }

    #[test]
    fn format_time_clamps_bad_input() {
        assert_eq!(format_time(-5.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn progress_is_zero_without_duration() {
        assert_eq!(progress_percent(12.0, 0.0), 0.0);
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn progress_percentage() {
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(120.0, 120.0), 100.0);
    }

    #[test]
    fn pointer_fraction_inside_bar() {
        assert_eq!(fraction_from_pointer(150.0, 100.0, 200.0), 0.25);
        assert_eq!(fraction_from_pointer(100.0, 100.0, 200.0), 0.0);
        assert_eq!(fraction_from_pointer(300.0, 100.0, 200.0), 1.0);
    }

    #[test]
    fn pointer_fraction_outside_bar_is_clamped() {
        assert_eq!(fraction_from_pointer(50.0, 100.0, 200.0), 0.0);
        assert_eq!(fraction_from_pointer(900.0, 100.0, 200.0), 1.0);
    }

    #[test]
    fn degenerate_bar_width() {
        assert_eq!(fraction_from_pointer(150.0, 100.0, 0.0), 0.0);
        assert_eq!(fraction_from_pointer(150.0, 100.0, -10.0), 0.0);
        assert_eq!(fraction_from_pointer(150.0, 100.0, f64::NAN), 0.0);
        assert_eq!(fraction_from_pointer(f64::NAN, 100.0, 200.0), 0.0);
    }
}
