//! Slider construction configuration.
//!
//! Every option is a typed field; TOML/JSON input is parsed and validated
//! once, before any state exists.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SliderError;
use crate::quantize::{QuantizationSpec, MAX_PRECISION};
use crate::transfer::ScaleMode;

/// Single handle or a low/high pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderMode {
    #[default]
    Single,
    Range,
}

/// Everything needed to build a [`crate::Slider`].
///
/// `floor` and `ceiling` are required; everything else has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub floor: f64,
    pub ceiling: f64,
    #[serde(default)]
    pub scale: ScaleMode,
    #[serde(default)]
    pub mode: SliderMode,
    /// Initial value of the single handle, or of the low handle in range mode.
    #[serde(default)]
    pub low: Option<f64>,
    /// Initial high value. Range mode only.
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default)]
    pub precision: u32,
    /// Origin of the step grid. `None` follows the current floor.
    #[serde(default)]
    pub align_floor: Option<f64>,
    /// Let a single handle sitting on the ceiling follow ceiling changes.
    #[serde(default)]
    pub track_ceiling_default: bool,
    /// Host hint: do not draw value labels.
    #[serde(default)]
    pub hide_bubble: bool,
}

fn default_step() -> f64 {
    1.0
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            floor: 0.0,
            ceiling: 100.0,
            scale: ScaleMode::Linear,
            mode: SliderMode::Single,
            low: None,
            high: None,
            step: default_step(),
            precision: 0,
            align_floor: None,
            track_ceiling_default: false,
            hide_bubble: false,
        }
    }
}

impl SliderConfig {
    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self {
            floor,
            ceiling,
            ..Self::default()
        }
    }

    pub fn logarithmic(mut self) -> Self {
        self.scale = ScaleMode::Logarithmic;
        self
    }

    pub fn range(mut self, low: f64, high: f64) -> Self {
        self.mode = SliderMode::Range;
        self.low = Some(low);
        self.high = Some(high);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.low = Some(value);
        self
    }

    pub fn with_step(mut self, step: f64, precision: u32) -> Self {
        self.step = step;
        self.precision = precision;
        self
    }

    pub fn quantization(&self) -> QuantizationSpec {
        QuantizationSpec::new(
            self.precision,
            self.step,
            self.align_floor.unwrap_or(self.floor),
        )
    }

    /// Parse a config from TOML text. Does not validate.
    pub fn from_toml_str(content: &str) -> Result<Self, SliderError> {
        toml::from_str(content).map_err(|e| SliderError::ConfigParse(e.to_string()))
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, SliderError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SliderError::Io(e.to_string()))?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Run every construction-time check.
    pub fn validate(&self) -> Result<(), SliderError> {
        validate_domain(self.floor, self.ceiling, self.scale)?;
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SliderError::InvalidStep { step: self.step });
        }
        if self.precision > MAX_PRECISION {
            return Err(SliderError::InvalidPrecision {
                precision: self.precision,
            });
        }
        Ok(())
    }
}

/// Check a `[floor, ceiling]` pair against a scale.
pub fn validate_domain(floor: f64, ceiling: f64, scale: ScaleMode) -> Result<(), SliderError> {
    if !floor.is_finite() || !ceiling.is_finite() {
        return Err(SliderError::NonFiniteBound);
    }
    if floor >= ceiling {
        return Err(SliderError::InvalidDomain { floor, ceiling });
    }
    if scale == ScaleMode::Logarithmic && ceiling <= 0.0 {
        return Err(SliderError::NonPositiveLogCeiling { ceiling });
    }
    Ok(())
}

/// A set of sliders, as read from a `[[slider]]` TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderDeck {
    #[serde(default)]
    pub slider: Vec<SliderConfig>,
}

impl SliderDeck {
    pub fn from_toml_str(content: &str) -> Result<Self, SliderError> {
        let deck: SliderDeck =
            toml::from_str(content).map_err(|e| SliderError::ConfigParse(e.to_string()))?;
        for config in &deck.slider {
            config.validate()?;
        }
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self, SliderError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SliderError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }
}
