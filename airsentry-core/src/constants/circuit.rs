//! Sensor Circuit Characteristics
//!
//! The MQ135 sensing element sits in a voltage divider with a load resistor.
//! The ADC measures the voltage across the load:
//!
//! ```text
//!  V_REF ──[ Rs (sensor) ]──┬──[ R_LOAD ]── GND
//!                           │
//!                          ADC
//! ```
//!
//! so `Rs = (V_REF - V) / V * R_LOAD`.

/// Full-scale reading of the 12-bit ADC (counts).
pub const ADC_MAX: u16 = 4095;

/// ADC reference / sensor supply voltage (V).
///
/// STM32F4 analog supply. The resistance model is ratiometric, so this
/// cancels out of the resistance; it only shows up in the reported voltage.
pub const SUPPLY_VOLTAGE: f32 = 3.3;

/// Load resistor on the breakout board (kΩ).
///
/// Source: common MQ135 modules ship with a 10 kΩ load
pub const LOAD_RESISTANCE_KOHM: f32 = 10.0;

/// Sensor resistance at the calibration reference (kΩ).
///
/// Normalises the power-law curve: at `Rs == R0` every gas reads its
/// scale constant.
pub const R0_KOHM: f32 = 10.0;
