//! Sensor Configuration
//!
//! Everything the pipeline needs to know about one sensor installation, as
//! a single table:
//!
//! ```json
//! {
//!   "circuit": { "supply_voltage": 3.3, "adc_max": 4095,
//!                "load_resistance_kohm": 10.0, "r0_kohm": 10.0 },
//!   "acquisition": { "sample_count": 500, "conversion_timeout_ms": 10,
//!                    "max_polls": 100000 },
//!   "smoothing_alpha": 0.2,
//!   "saturation": "clamp",
//!   "interpolation": "continuous",
//!   "channels": [
//!     { "gas": "co2", "ppm_const": 116.602, "exponent": -2.769,
//!       "breakpoints": [0, 400, 1000, 2000] }
//!   ]
//! }
//! ```
//!
//! Omitted sections take the MQ135 defaults from [`crate::constants`].
//! Tables are validated once at load time so the read path never has to
//! second-guess them.

use heapless::Vec;

use crate::{
    acquisition::AcquisitionConfig,
    concentration::PowerLawCurve,
    constants::{gases::*, MAX_CHANNELS, SMOOTHING_ALPHA},
    errors::{AqiError, AqiResult},
    index::{Breakpoints, Interpolation, SaturationPolicy},
    resistance::CircuitConfig,
    traits::Validatable,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pollutant tracked by one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Gas {
    /// Carbon dioxide
    Co2,
    /// Smoke (mixed combustion products)
    Smoke,
    /// Nitrogen oxides
    Nox,
    /// Ozone
    O3,
}

impl Gas {
    /// Short display label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gas::Co2 => "CO2",
            Gas::Smoke => "Smoke",
            Gas::Nox => "NOx",
            Gas::O3 => "O3",
        }
    }
}

impl core::fmt::Display for Gas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response curve and breakpoint table for one gas
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelConfig {
    /// Which pollutant
    pub gas: Gas,
    /// Concentration at `Rs == R0` (ppm)
    pub ppm_const: f32,
    /// Power-law exponent
    pub exponent: f32,
    /// Ascending sub-index thresholds (ppm)
    pub breakpoints: Breakpoints,
}

impl ChannelConfig {
    /// Channel from curve coefficients and thresholds
    pub fn new(gas: Gas, ppm_const: f32, exponent: f32, breakpoints: &[f32]) -> AqiResult<Self> {
        let channel = Self {
            gas,
            ppm_const,
            exponent,
            breakpoints: Breakpoints::new(breakpoints)?,
        };
        channel.validate()?;
        Ok(channel)
    }

    /// Power-law view of the coefficients
    pub fn curve(&self) -> PowerLawCurve {
        PowerLawCurve::new(self.ppm_const, self.exponent)
    }

    /// Curve and breakpoint checks
    pub fn validate(&self) -> AqiResult<()> {
        self.curve().validate()?;
        self.breakpoints.validate()
    }

    /// Datasheet defaults for `gas` on an MQ135
    pub fn mq135(gas: Gas) -> Self {
        let (ppm_const, exponent, breakpoints): (f32, f32, &[f32]) = match gas {
            Gas::Co2 => (CO2_PPM_CONST, CO2_EXPONENT, &CO2_BREAKPOINTS),
            Gas::Smoke => (SMOKE_PPM_CONST, SMOKE_EXPONENT, &SMOKE_BREAKPOINTS),
            Gas::Nox => (NOX_PPM_CONST, NOX_EXPONENT, &NOX_BREAKPOINTS),
            Gas::O3 => (O3_PPM_CONST, O3_EXPONENT, &O3_BREAKPOINTS),
        };

        Self {
            gas,
            ppm_const,
            exponent,
            breakpoints: Breakpoints::from_trusted(breakpoints),
        }
    }
}

/// Complete installation settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// Divider and ADC constants
    pub circuit: CircuitConfig,
    /// Averaging and timeout
    pub acquisition: AcquisitionConfig,
    /// Weight of each new resistance sample, `0 < alpha <= 1`
    pub smoothing_alpha: f32,
    /// Handling of concentrations above the top breakpoint
    pub saturation: SaturationPolicy,
    /// Placement of concentrations inside a band
    pub interpolation: Interpolation,
    /// Gas channels, reduced in this order
    pub channels: Vec<ChannelConfig, MAX_CHANNELS>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        let mut channels = Vec::new();
        for gas in [Gas::Co2, Gas::Smoke, Gas::Nox, Gas::O3] {
            // Capacity is MAX_CHANNELS; four always fit
            let _ = channels.push(ChannelConfig::mq135(gas));
        }

        Self {
            circuit: CircuitConfig::default(),
            acquisition: AcquisitionConfig::default(),
            smoothing_alpha: SMOOTHING_ALPHA,
            saturation: SaturationPolicy::default(),
            interpolation: Interpolation::default(),
            channels,
        }
    }
}

impl SensorConfig {
    /// Check every section; the first problem found is returned
    pub fn validate(&self) -> AqiResult<()> {
        self.circuit.validate()?;

        if self.acquisition.sample_count == 0 {
            return Err(AqiError::InvalidConfig { reason: "sample count must be at least 1" });
        }
        if self.acquisition.max_polls == 0 {
            return Err(AqiError::InvalidConfig { reason: "poll budget must be at least 1" });
        }
        if !self.smoothing_alpha.is_valid() || self.smoothing_alpha <= 0.0 || self.smoothing_alpha > 1.0 {
            return Err(AqiError::InvalidConfig { reason: "smoothing alpha must be in (0, 1]" });
        }
        if self.channels.is_empty() {
            return Err(AqiError::InvalidConfig { reason: "at least one gas channel is required" });
        }

        for (i, channel) in self.channels.iter().enumerate() {
            channel.validate()?;
            if self.channels[..i].iter().any(|earlier| earlier.gas == channel.gas) {
                return Err(AqiError::InvalidConfig { reason: "gas listed more than once" });
            }
        }

        Ok(())
    }

    /// Channel settings for `gas`, if configured
    pub fn channel(&self, gas: Gas) -> Option<&ChannelConfig> {
        self.channels.iter().find(|channel| channel.gas == gas)
    }

    /// Parse a JSON document and validate it
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> AqiResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log_warn!("Rejected sensor configuration: {}", e);
            AqiError::InvalidConfig { reason: "malformed configuration document" }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    #[cfg(feature = "std")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> AqiResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            log_warn!("Cannot read sensor configuration {}: {}", path.display(), e);
            AqiError::InvalidConfig { reason: "configuration file unreadable" }
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> AqiResult<std::string::String> {
        serde_json::to_string_pretty(self).map_err(|_| AqiError::InvalidConfig {
            reason: "configuration not representable as JSON",
        })
    }
}
