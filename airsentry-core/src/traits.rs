//! Collaborator traits
//!
//! The pipeline never touches registers. Boards provide an [`AnalogInput`]
//! for the gas sensor channel and, when fitted, an [`EnvironmentSource`] for
//! ambient temperature and humidity. Tests provide fakes.

use crate::{compensation::EnvironmentalConditions, errors::AqiResult};

/// One ADC channel wired to the gas sensor.
///
/// Mirrors the HAL start / poll / read sequence. Polling uses the `nb`
/// convention: `Err(nb::Error::WouldBlock)` while the conversion is busy.
pub trait AnalogInput {
    /// Hardware fault type reported while polling
    type Error;

    /// Kick off a single conversion
    fn start_conversion(&mut self);

    /// Check for conversion complete without blocking
    fn poll_conversion(&mut self) -> nb::Result<(), Self::Error>;

    /// Latest conversion result in `[0, ADC_MAX]`
    fn read_raw(&mut self) -> u16;
}

impl<A: AnalogInput + ?Sized> AnalogInput for &mut A {
    type Error = A::Error;

    fn start_conversion(&mut self) {
        (**self).start_conversion()
    }

    fn poll_conversion(&mut self) -> nb::Result<(), Self::Error> {
        (**self).poll_conversion()
    }

    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}

/// Ambient conditions for concentration compensation
pub trait EnvironmentSource {
    /// Current temperature (°C) and relative humidity (%)
    fn conditions(&self) -> AqiResult<EnvironmentalConditions>;
}

/// Trait for values that can be checked for numeric sanity
pub trait Validatable {
    /// Check the value is usable (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validatable_floats() {
        assert!(5.0f32.is_valid());
        assert!(!f32::NAN.is_valid());
        assert!(!f32::INFINITY.is_valid());
        assert!(!f32::NEG_INFINITY.is_valid());
    }
}
