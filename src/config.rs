//! Time grid configuration.
//!
//! A [`GridConfig`] fixes the grid origin and step that interpolated points
//! snap to, the drift tolerance for stationary segments, and the decimal
//! precision of emitted coordinates.
use crate::error::{GridError, Result};

/// Largest supported rounding precision, in decimal digits.
pub const MAX_PRECISION: u32 = 22;

/// Grid configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Grid origin timestamp
    #[serde(default)]
    pub time_min: i64,

    /// Grid step, same unit as sample timestamps
    #[serde(default = "GridConfig::default_time_delta")]
    pub time_delta: i64,

    /// Maximum absolute lon/lat drift for a segment to count as stationary
    #[serde(default = "GridConfig::default_tolerance")]
    pub tolerance: f64,

    /// Decimal digits kept when rounding emitted coordinates
    #[serde(default = "GridConfig::default_precision")]
    pub precision: u32,
}

impl GridConfig {
    const fn default_time_delta() -> i64 {
        60
    }

    const fn default_tolerance() -> f64 {
        1e-4
    }

    const fn default_precision() -> u32 {
        6
    }

    pub fn with_time_min(mut self, time_min: i64) -> Self {
        self.time_min = time_min;
        self
    }

    /// # Panics
    ///
    /// Panics if `time_delta` is not positive.
    pub fn with_time_delta(mut self, time_delta: i64) -> Self {
        assert!(time_delta > 0, "Time delta must be greater than zero");
        self.time_delta = time_delta;
        self
    }

    /// # Panics
    ///
    /// Panics if `tolerance` is negative or not finite.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance.is_finite() && tolerance >= 0.0,
            "Tolerance must be a finite, non-negative number"
        );
        self.tolerance = tolerance;
        self
    }

    /// # Panics
    ///
    /// Panics if `precision` exceeds [`MAX_PRECISION`].
    pub fn with_precision(mut self, precision: u32) -> Self {
        assert!(
            precision <= MAX_PRECISION,
            "Precision must not exceed {} digits",
            MAX_PRECISION
        );
        self.precision = precision;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_delta <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "Time delta must be greater than zero, got: {}",
                self.time_delta
            )));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "Tolerance must be a finite, non-negative number, got: {}",
                self.tolerance
            )));
        }

        if self.precision > MAX_PRECISION {
            return Err(GridError::InvalidConfig(format!(
                "Precision must not exceed {} digits, got: {}",
                MAX_PRECISION, self.precision
            )));
        }

        Ok(())
    }

    /// Timestamp of grid index `index`.
    pub fn grid_time(&self, index: i64) -> i64 {
        self.time_min + self.time_delta * index
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: GridConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            time_min: 0,
            time_delta: Self::default_time_delta(),
            tolerance: Self::default_tolerance(),
            precision: Self::default_precision(),
        }
    }
}
