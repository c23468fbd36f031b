//! Concentration model
//!
//! MOx response curves are straight lines on a log-log plot of `Rs/R0`
//! against concentration, so each gas is a power law:
//!
//! ```text
//! ppm = a · (Rs / R0)^b
//! ```
//!
//! The model is gas-agnostic; coefficients come from the channel table.

use crate::{
    errors::{AqiError, AqiResult},
    traits::Validatable,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Concentration in parts per million
pub type Ppm = f32;

/// `ppm_const · (resistance / r0)^exponent`
///
/// Undefined for `resistance <= 0`; callers feed it validated resistances.
pub fn to_ppm(resistance: f32, r0: f32, ppm_const: f32, exponent: f32) -> Ppm {
    ppm_const * libm::powf(resistance / r0, exponent)
}

/// Fitted response curve for one gas
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerLawCurve {
    /// Concentration at `Rs == R0` (ppm)
    pub ppm_const: f32,
    /// Log-log slope; negative for MOx sensors
    pub exponent: f32,
}

impl PowerLawCurve {
    /// Curve from datasheet coefficients
    pub const fn new(ppm_const: f32, exponent: f32) -> Self {
        Self { ppm_const, exponent }
    }

    /// Scale must be positive, exponent finite and negative so that PPM
    /// rises as resistance falls
    pub fn validate(&self) -> AqiResult<()> {
        if !self.ppm_const.is_valid() || self.ppm_const <= 0.0 {
            return Err(AqiError::InvalidConfig { reason: "curve scale must be positive" });
        }
        if !self.exponent.is_valid() || self.exponent >= 0.0 {
            return Err(AqiError::InvalidConfig { reason: "curve exponent must be negative" });
        }
        Ok(())
    }

    /// Concentration for a sensor resistance
    pub fn ppm(&self, resistance: f32, r0: f32) -> AqiResult<Ppm> {
        if !resistance.is_valid() || resistance <= 0.0 {
            return Err(AqiError::InvalidValue);
        }

        let ppm = to_ppm(resistance, r0, self.ppm_const, self.exponent);
        if !ppm.is_valid() {
            return Err(AqiError::InvalidValue);
        }

        Ok(ppm)
    }
}
