//! Error Types for the Air-Quality Pipeline
//!
//! ## Design
//!
//! Errors travel through the read cycle of a microcontroller, so they are
//! kept small and `Copy`: no `String`, only `&'static str` reasons and the
//! numbers needed to act on them.
//!
//! ## Error Categories
//!
//! ### Reading Problems
//! - `InvalidReading`: ADC sat on a rail (0 or full scale), resistance undefined
//! - `SaturatedReading`: concentration above the top breakpoint
//! - `InvalidValue`: NaN or infinity reached an arithmetic stage
//! - `OutOfRange`: ambient temperature / humidity outside plausible limits
//!
//! ### Hardware Problems
//! - `AcquisitionTimeout`: a conversion never completed
//! - `SensorFault`: the ADC collaborator reported a fault
//!
//! ### Setup Problems
//! - `InvalidConfig`: configuration table rejected at load time
//!
//! ## Handling Strategy
//!
//! ```rust
//! use airsentry_core::AqiError;
//!
//! fn on_cycle_error(err: AqiError) {
//!     match err {
//!         AqiError::AcquisitionTimeout { .. } | AqiError::SensorFault { .. } => {
//!             // reset the ADC peripheral and skip this upload
//!         }
//!         AqiError::InvalidReading { .. } => {
//!             // sensor unplugged or still heating; try again next cycle
//!         }
//!         _ => {}
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for pipeline operations
pub type AqiResult<T> = Result<T, AqiError>;

/// Pipeline errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AqiError {
    /// Averaged ADC reading at a rail; sensor resistance is undefined there
    #[error("Invalid reading: {raw} counts gives no finite positive resistance")]
    InvalidReading {
        /// Averaged ADC counts that were rejected
        raw: u32,
    },

    /// Concentration above the highest configured breakpoint
    #[error("Saturated reading: {ppm} ppm exceeds top breakpoint {limit} ppm")]
    SaturatedReading {
        /// Concentration that fell off the scale
        ppm: f32,
        /// Highest breakpoint of the channel
        limit: f32,
    },

    /// A conversion stayed busy past its deadline
    #[error("Acquisition timed out after {completed} of {requested} samples")]
    AcquisitionTimeout {
        /// Conversions that completed before the stall
        completed: u32,
        /// Conversions the caller asked for
        requested: u32,
    },

    /// ADC collaborator reported a hardware fault
    #[error("Sensor fault: {reason}")]
    SensorFault {
        /// What the hardware reported
        reason: &'static str,
    },

    /// Environmental reading outside plausible limits
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The offending reading
        value: f32,
        /// Lowest accepted value
        min: f32,
        /// Highest accepted value
        max: f32,
    },

    /// Value makes no numeric sense (NaN, infinity)
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Configuration rejected at load time
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// First problem found
        reason: &'static str,
    },
}

impl AqiError {
    /// True for faults in the acquisition hardware rather than in the data
    pub fn is_hardware(&self) -> bool {
        matches!(self, Self::AcquisitionTimeout { .. } | Self::SensorFault { .. })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AqiError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidReading { raw } =>
                defmt::write!(fmt, "Invalid reading: {} counts", raw),
            Self::SaturatedReading { ppm, limit } =>
                defmt::write!(fmt, "Saturated: {} ppm > {} ppm", ppm, limit),
            Self::AcquisitionTimeout { completed, requested } =>
                defmt::write!(fmt, "Timeout after {}/{} samples", completed, requested),
            Self::SensorFault { reason } =>
                defmt::write!(fmt, "Sensor fault: {}", reason),
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
        }
    }
}
