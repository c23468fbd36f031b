//! Environmental Compensation
//!
//! ## Physics Background
//!
//! A heated MOx element reacts with ambient water vapour and its surface
//! reaction rate depends on temperature, so the same gas concentration
//! reads differently on a hot humid afternoon than on a cool dry night.
//! Around the datasheet reference point (25 °C, 50 %RH) the drift is close
//! to linear in each variable:
//!
//! ```text
//! adjusted = ppm · (1 + 0.02·(T - 25)) · (1 + 0.01·(H - 50))
//! ```
//!
//! At the reference point both factors are exactly 1.0.
//!
//! ## Sources
//!
//! The compensator is a pure function. Where conditions come from is the
//! job of an [`EnvironmentSource`]:
//! - [`StandardEnvironment`]: boards without a temperature/humidity sensor
//! - [`FixedEnvironment`]: a fixed reading (bench tests, replay)
//! - a board driver for a DHT22 / SHT3x wrapping its own reads
//!
//! Readings are range-checked before use; the monitor falls back to
//! standard conditions when a source misbehaves.

use crate::{
    constants::environment::{
        AMBIENT_HUMIDITY_MAX_PCT, AMBIENT_HUMIDITY_MIN_PCT, AMBIENT_TEMP_MAX_C, AMBIENT_TEMP_MIN_C,
        HUMIDITY_COEFF_PER_PCT, STANDARD_HUMIDITY_PCT, STANDARD_TEMPERATURE_C,
        TEMPERATURE_COEFF_PER_C,
    },
    errors::AqiResult,
    traits::EnvironmentSource,
    validation::check_range,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ambient temperature and relative humidity
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvironmentalConditions {
    /// Air temperature (°C)
    pub temperature_c: f32,
    /// Relative humidity (%)
    pub humidity_pct: f32,
}

impl EnvironmentalConditions {
    /// Datasheet reference point; compensation is a no-op here
    pub const STANDARD: Self = Self {
        temperature_c: STANDARD_TEMPERATURE_C,
        humidity_pct: STANDARD_HUMIDITY_PCT,
    };

    /// Conditions from a temperature / humidity pair
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self { temperature_c, humidity_pct }
    }

    /// Reject readings no working ambient sensor would produce
    pub fn validate(&self) -> AqiResult<()> {
        check_range(self.temperature_c, AMBIENT_TEMP_MIN_C, AMBIENT_TEMP_MAX_C)?;
        check_range(self.humidity_pct, AMBIENT_HUMIDITY_MIN_PCT, AMBIENT_HUMIDITY_MAX_PCT)
    }

    /// Multiplicative correction for these conditions
    pub fn factor(&self) -> f32 {
        compensation_factor(self.temperature_c, self.humidity_pct)
    }
}

impl Default for EnvironmentalConditions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// `(1 + 0.02·(T - 25)) · (1 + 0.01·(H - 50))`
pub fn compensation_factor(temperature_c: f32, humidity_pct: f32) -> f32 {
    let temp_factor = 1.0 + (temperature_c - STANDARD_TEMPERATURE_C) * TEMPERATURE_COEFF_PER_C;
    let humidity_factor = 1.0 + (humidity_pct - STANDARD_HUMIDITY_PCT) * HUMIDITY_COEFF_PER_PCT;
    temp_factor * humidity_factor
}

/// Adjust a concentration for ambient temperature (°C) and humidity (%)
pub fn compensate(ppm: f32, temperature_c: f32, humidity_pct: f32) -> f32 {
    ppm * compensation_factor(temperature_c, humidity_pct)
}

/// Stand-in for boards without an ambient sensor: always 25 °C, 50 %RH
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEnvironment;

impl EnvironmentSource for StandardEnvironment {
    fn conditions(&self) -> AqiResult<EnvironmentalConditions> {
        Ok(EnvironmentalConditions::STANDARD)
    }
}

/// Environment source that always reports the same reading
#[derive(Debug, Clone, Copy)]
pub struct FixedEnvironment(pub EnvironmentalConditions);

impl EnvironmentSource for FixedEnvironment {
    fn conditions(&self) -> AqiResult<EnvironmentalConditions> {
        Ok(self.0)
    }
}
