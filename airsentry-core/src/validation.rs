//! Shared range and sanity checks
//!
//! Pure helpers used wherever an input crosses into the pipeline: ambient
//! readings from an environment sensor, and configuration tables at load
//! time. No side effects, no allocation.

use crate::{
    errors::{AqiError, AqiResult},
    traits::Validatable,
};

/// Check if a value is within the specified range (inclusive)
pub fn check_range(value: f32, min: f32, max: f32) -> AqiResult<()> {
    if !value.is_valid() {
        return Err(AqiError::InvalidValue);
    }

    if value < min || value > max {
        Err(AqiError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

/// True if every value is strictly greater than the one before it
pub fn is_strictly_ascending(values: &[f32]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}
