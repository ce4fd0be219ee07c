//! Transfer functions: percent <-> domain value.
//!
//! Two scales are supported:
//! - **Linear**: `value = floor + (ceiling - floor) * percent / 100`
//! - **Logarithmic**: equal track distances cover equal ratios of value
//!
//! The two directions are written out independently. In the linear case they
//! are NOT exact inverses: `percent_from_value` divides by `ceiling` rather
//! than by `ceiling - floor`, so it only agrees with `value_from_percent`
//! when `floor == 0`.
//!
//! Both directions pin the extremes: `floor` maps to exactly 0 and `ceiling`
//! to exactly 100, so handles at the bounds never drift from round-off.

use serde::{Deserialize, Serialize};

const MIN_PERCENT: f64 = 0.0;
const MAX_PERCENT: f64 = 100.0;

/// Which transfer function a slider uses. Fixed per slider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Linear,
    Logarithmic,
}

impl ScaleMode {
    pub fn percent_from_value(self, value: f64, floor: f64, ceiling: f64) -> f64 {
        match self {
            ScaleMode::Linear => linear_percent(value, floor, ceiling),
            ScaleMode::Logarithmic => log_percent(value, floor, ceiling),
        }
    }

    pub fn value_from_percent(self, percent: f64, floor: f64, ceiling: f64) -> f64 {
        match self {
            ScaleMode::Linear => linear_value(percent, floor, ceiling),
            ScaleMode::Logarithmic => log_value(percent, floor, ceiling),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleMode::Linear => "linear",
            ScaleMode::Logarithmic => "log",
        }
    }
}

/// Convert a pixel offset along the track into a percent.
///
/// A zero-width track (not laid out yet) reports 0.
pub fn percent_from_offset(offset: f64, track_width: f64) -> f64 {
    if track_width <= 0.0 {
        return MIN_PERCENT;
    }
    offset / track_width * 100.0
}

/// Linear percent. Divides by `ceiling`; see the module docs.
pub fn linear_percent(value: f64, floor: f64, ceiling: f64) -> f64 {
    if value == ceiling {
        return MAX_PERCENT;
    }
    if value == floor {
        return MIN_PERCENT;
    }
    let percent = (value - floor) / ceiling * 100.0;
    if percent.is_nan() {
        return MIN_PERCENT;
    }
    percent.clamp(MIN_PERCENT, MAX_PERCENT)
}

pub fn linear_value(percent: f64, floor: f64, ceiling: f64) -> f64 {
    floor + (ceiling - floor) * percent / 100.0
}

/// Logarithmic percent. Non-positive bounds and values contribute `ln = 0`.
pub fn log_percent(value: f64, floor: f64, ceiling: f64) -> f64 {
    if value == ceiling {
        return MAX_PERCENT;
    }
    if value == floor {
        return MIN_PERCENT;
    }
    let minv = ln_or_zero(floor);
    let maxv = ln_or_zero(ceiling);
    let valuev = ln_or_zero(value);

    let scale = (maxv - minv) / (MAX_PERCENT - MIN_PERCENT);
    let result = (valuev - minv) / scale + MIN_PERCENT;
    if result.is_nan() {
        return MIN_PERCENT;
    }
    result.clamp(MIN_PERCENT, MAX_PERCENT)
}

pub fn log_value(percent: f64, floor: f64, ceiling: f64) -> f64 {
    if percent == MIN_PERCENT && floor == 0.0 {
        return 0.0;
    }
    if percent == MAX_PERCENT {
        return ceiling;
    }
    let minv = ln_or_zero(floor);
    let maxv = ceiling.ln();

    let scale = (maxv - minv) / (MAX_PERCENT - MIN_PERCENT);
    (minv + scale * (percent - MIN_PERCENT)).exp()
}

#[inline]
fn ln_or_zero(x: f64) -> f64 {
    if x > 0.0 {
        x.ln()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn linear_extremes_are_exact() {
        assert_eq!(linear_percent(100.0, 0.0, 100.0), 100.0);
        assert_eq!(linear_percent(0.0, 0.0, 100.0), 0.0);
        assert_eq!(linear_percent(20.0, 20.0, 80.0), 0.0);
        assert_eq!(linear_percent(80.0, 20.0, 80.0), 100.0);
    }

    #[test]
    fn linear_percent_divides_by_ceiling() {
        // floor 20, ceiling 80, value 50: (50 - 20) / 80 = 37.5%, not 50%.
        assert!(approx(linear_percent(50.0, 20.0, 80.0), 37.5, 1e-12));
        // With floor 0 it is a true linear percent.
        assert!(approx(linear_percent(25.0, 0.0, 100.0), 25.0, 1e-12));
    }

    #[test]
    fn linear_percent_clamps_negative_floor_overflow() {
        // (50 - -100) / 100 = 150% before clamping.
        assert_eq!(linear_percent(50.0, -100.0, 100.0), 100.0);
    }

    #[test]
    fn linear_value_spans_the_domain() {
        assert_eq!(linear_value(0.0, 20.0, 80.0), 20.0);
        assert_eq!(linear_value(50.0, 20.0, 80.0), 50.0);
        assert_eq!(linear_value(100.0, 20.0, 80.0), 80.0);
    }

    #[test]
    fn log_midpoint_is_geometric_mean() {
        let v = log_value(50.0, 100.0, 10_000.0);
        assert!(approx(v, 1000.0, 1e-6), "got {v}");
        let p = log_percent(1000.0, 100.0, 10_000.0);
        assert!(approx(p, 50.0, 1e-9), "got {p}");
    }

    #[test]
    fn log_zero_floor_at_zero_percent_is_zero() {
        assert_eq!(log_value(0.0, 0.0, 1000.0), 0.0);
        // Anything above zero percent starts from ln(1).
        assert!(approx(log_value(100.0 / 3.0, 0.0, 1000.0), 10.0, 1e-9));
    }

    #[test]
    fn log_percent_clamps_below_floor() {
        assert_eq!(log_percent(1.0, 100.0, 10_000.0), 0.0);
        assert_eq!(log_percent(1e9, 100.0, 10_000.0), 100.0);
    }

    #[test]
    fn log_extremes_are_exact() {
        assert_eq!(log_percent(100.0, 100.0, 10_000.0), 0.0);
        assert_eq!(log_percent(10_000.0, 100.0, 10_000.0), 100.0);
        assert_eq!(log_value(100.0, 100.0, 10_000.0), 10_000.0);
    }

    #[test]
    fn offset_on_unlaid_track_is_zero() {
        assert_eq!(percent_from_offset(10.0, 0.0), 0.0);
        assert_eq!(percent_from_offset(100.0, 200.0), 50.0);
    }

    #[test]
    fn scale_mode_deserializes_lowercase() {
        let mode: ScaleMode = serde_json::from_str("\"logarithmic\"").unwrap();
        assert_eq!(mode, ScaleMode::Logarithmic);
        assert_eq!(ScaleMode::default(), ScaleMode::Linear);
    }
}
