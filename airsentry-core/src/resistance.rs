//! Resistance Model
//!
//! Converts an averaged ADC reading into the resistance of the sensing
//! element. The sensor and the load resistor form a divider across the
//! supply; the ADC sees the load side:
//!
//! ```text
//! V  = counts / ADC_MAX * V_REF
//! Rs = (V_REF - V) / V * R_LOAD
//! ```
//!
//! ## Domain
//!
//! Both rails are rejected:
//! - `counts == 0`: V = 0, Rs is infinite (sensor open or unpowered)
//! - `counts >= ADC_MAX`: V = V_REF, Rs is zero and the power-law curve
//!   downstream is undefined
//!
//! Either case is an [`AqiError::InvalidReading`]; the monitor decides
//! whether to reuse the last smoothed value.

use crate::{
    constants::{ADC_MAX, LOAD_RESISTANCE_KOHM, R0_KOHM, SUPPLY_VOLTAGE},
    errors::{AqiError, AqiResult},
    traits::Validatable,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensing-element resistance (kΩ)
pub type Resistance = f32;

/// Circuit constants around the sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CircuitConfig {
    /// ADC reference / divider supply (V)
    pub supply_voltage: f32,
    /// ADC full-scale reading (counts)
    pub adc_max: u16,
    /// Load resistor (kΩ)
    pub load_resistance_kohm: f32,
    /// Sensor resistance at the calibration reference (kΩ)
    pub r0_kohm: f32,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            supply_voltage: SUPPLY_VOLTAGE,
            adc_max: ADC_MAX,
            load_resistance_kohm: LOAD_RESISTANCE_KOHM,
            r0_kohm: R0_KOHM,
        }
    }
}

impl CircuitConfig {
    /// Reject constants that would make the divider math meaningless
    pub fn validate(&self) -> AqiResult<()> {
        if !self.supply_voltage.is_valid() || self.supply_voltage <= 0.0 {
            return Err(AqiError::InvalidConfig { reason: "supply voltage must be positive" });
        }
        if self.adc_max == 0 {
            return Err(AqiError::InvalidConfig { reason: "ADC full scale must be positive" });
        }
        if !self.load_resistance_kohm.is_valid() || self.load_resistance_kohm <= 0.0 {
            return Err(AqiError::InvalidConfig { reason: "load resistance must be positive" });
        }
        if !self.r0_kohm.is_valid() || self.r0_kohm <= 0.0 {
            return Err(AqiError::InvalidConfig { reason: "R0 must be positive" });
        }
        Ok(())
    }
}

/// Divider model turning ADC counts into sensor resistance
#[derive(Debug, Clone, Copy)]
pub struct ResistanceModel {
    circuit: CircuitConfig,
}

impl Default for ResistanceModel {
    fn default() -> Self {
        Self { circuit: CircuitConfig::default() }
    }
}

impl ResistanceModel {
    /// Model for the given circuit
    pub fn new(circuit: CircuitConfig) -> AqiResult<Self> {
        circuit.validate()?;
        Ok(Self { circuit })
    }

    /// Circuit constants in use
    pub fn circuit(&self) -> &CircuitConfig {
        &self.circuit
    }

    /// Voltage at the ADC pin for an averaged reading
    pub fn voltage(&self, counts: u32) -> f32 {
        counts as f32 / self.circuit.adc_max as f32 * self.circuit.supply_voltage
    }

    /// Sensor resistance (kΩ) for an averaged reading
    pub fn to_resistance(&self, counts: u32) -> AqiResult<Resistance> {
        if counts == 0 || counts >= u32::from(self.circuit.adc_max) {
            return Err(AqiError::InvalidReading { raw: counts });
        }

        let v_ref = self.circuit.supply_voltage;
        let voltage = self.voltage(counts);
        let resistance = (v_ref - voltage) / voltage * self.circuit.load_resistance_kohm;

        if !resistance.is_valid() || resistance <= 0.0 {
            return Err(AqiError::InvalidReading { raw: counts });
        }

        Ok(resistance)
    }
}
