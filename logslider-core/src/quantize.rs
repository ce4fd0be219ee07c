//! Step quantization.
//!
//! A raw value is snapped to the nearest point of the grid
//! `align_floor + k * step` and then rounded to `precision` decimal digits.
//! Exactly half a step rounds down (toward `value - remainder`).

use serde::{Deserialize, Serialize};

/// Largest accepted `precision`, the same range a decimal formatter allows.
pub const MAX_PRECISION: u32 = 100;

/// Rounding grid for committed values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizationSpec {
    pub precision: u32,
    pub step: f64,
    pub align_floor: f64,
}

impl Default for QuantizationSpec {
    fn default() -> Self {
        Self {
            precision: 0,
            step: 1.0,
            align_floor: 0.0,
        }
    }
}

impl QuantizationSpec {
    pub fn new(precision: u32, step: f64, align_floor: f64) -> Self {
        Self {
            precision,
            step,
            align_floor,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        quantize(value, self.precision, self.step, self.align_floor)
    }
}

/// Snap `value` to the step grid anchored at `align_floor`, then round.
///
/// The remainder keeps the sign of `value - align_floor` (Rust's `%` on
/// floats), so values below the anchor snap upward when the remainder is
/// negative.
pub fn quantize(value: f64, precision: u32, step: f64, align_floor: f64) -> f64 {
    let remainder = (value - align_floor) % step;
    let stepped = if remainder > step / 2.0 {
        value + step - remainder
    } else {
        value - remainder
    };
    round_to(stepped, precision)
}

/// Round half away from zero to `precision` decimals.
///
/// Past the resolution of `f64` rounding is a no-op: a precision whose
/// scale factor (or scaled value) is not finite returns `value` unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let Ok(exponent) = i32::try_from(precision) else {
        return normalize_zero(value);
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return normalize_zero(value);
    }
    normalize_zero(scaled.round() / factor)
}

/// Normalize -0.0 so callers comparing with 0.0 see a clean zero.
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_down_below_half_step() {
        assert_eq!(quantize(23.0, 0, 10.0, 0.0), 20.0);
    }

    #[test]
    fn snaps_up_above_half_step() {
        assert_eq!(quantize(26.0, 0, 10.0, 0.0), 30.0);
    }

    #[test]
    fn exact_half_step_rounds_down() {
        assert_eq!(quantize(25.0, 0, 10.0, 0.0), 20.0);
    }

    #[test]
    fn grid_is_anchored_at_align_floor() {
        // Grid 5, 15, 25, ...
        assert_eq!(quantize(12.0, 0, 10.0, 5.0), 15.0);
        assert_eq!(quantize(9.0, 0, 10.0, 5.0), 5.0);
    }

    #[test]
    fn negative_remainder_keeps_sign() {
        // (-23) % 10 == -3, which is not > 5, so -23 - (-3) = -20.
        assert_eq!(quantize(-23.0, 0, 10.0, 0.0), -20.0);
        // (-27) % 10 == -7 -> -20 as well: the remainder is never > step / 2.
        assert_eq!(quantize(-27.0, 0, 10.0, 0.0), -20.0);
    }

    #[test]
    fn precision_rounds_fractional_steps() {
        assert_eq!(quantize(0.3, 1, 0.1, 0.0), 0.3);
        assert_eq!(quantize(1.26, 2, 0.05, 0.0), 1.25);
        assert_eq!(quantize(1.234, 1, 0.1, 0.0), 1.2);
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(-0.4, 0), 0.0);
    }

    #[test]
    fn huge_precision_is_a_no_op() {
        assert_eq!(round_to(23.0, 400), 23.0);
        assert_eq!(round_to(23.0, u32::MAX), 23.0);
        assert_eq!(round_to(-0.0, 400), 0.0);
        assert_eq!(quantize(23.0, 400, 10.0, 0.0), 20.0);
    }

    #[test]
    fn max_precision_keeps_values_finite() {
        assert_eq!(round_to(0.125, MAX_PRECISION), 0.125);
        // 1e300 * 1e100 overflows; the value comes back untouched.
        assert_eq!(round_to(1e300, MAX_PRECISION), 1e300);
    }

    #[test]
    fn default_spec_rounds_to_integers() {
        let spec = QuantizationSpec::default();
        assert_eq!(spec.apply(41.6), 42.0);
        assert_eq!(spec.apply(41.4), 41.0);
    }
}
