//! Configuration errors.
//!
//! Everything that can go wrong in the core is a construction-time (or
//! rebind-time) configuration problem. Pointer input never fails: bad
//! coordinates are dropped and out-of-range values are clamped.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    #[error("floor must be below ceiling (floor: {floor}, ceiling: {ceiling})")]
    InvalidDomain { floor: f64, ceiling: f64 },

    #[error("logarithmic scale needs a positive ceiling (got {ceiling})")]
    NonPositiveLogCeiling { ceiling: f64 },

    #[error("step must be a positive finite number (got {step})")]
    InvalidStep { step: f64 },

    #[error("precision must be at most {max} decimal digits (got {precision})", max = crate::quantize::MAX_PRECISION)]
    InvalidPrecision { precision: u32 },

    #[error("floor and ceiling must be finite")]
    NonFiniteBound,

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("config I/O error: {0}")]
    Io(String),
}
