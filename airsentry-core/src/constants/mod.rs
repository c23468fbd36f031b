//! Constants for AirSentry Core
//!
//! Compile-time defaults for the gas pipeline. Every value here is also
//! reachable through [`SensorConfig`](crate::config::SensorConfig), so a
//! deployment can recalibrate without rebuilding; these are what a fresh
//! configuration starts from.
//!
//! ## Organization
//!
//! - **Circuit**: ADC and voltage-divider characteristics
//! - **Sampling**: averaging window, conversion timeout, smoothing factor
//! - **Gases**: MQ135 power-law coefficients and breakpoint tables
//! - **Environment**: compensation reference point and plausible ranges
//! - **Index**: sub-index scale

/// ADC and voltage-divider characteristics.
pub mod circuit;

/// Averaging, timeout and smoothing defaults.
pub mod sampling;

/// Per-gas power-law coefficients and AQI breakpoints.
pub mod gases;

/// Temperature / humidity compensation parameters.
pub mod environment;

/// Sub-index scale and table limits.
pub mod index;

pub use circuit::{ADC_MAX, LOAD_RESISTANCE_KOHM, R0_KOHM, SUPPLY_VOLTAGE};
pub use sampling::{CONVERSION_POLL_BUDGET, CONVERSION_TIMEOUT_MS, GAS_SAMPLE_COUNT, SMOOTHING_ALPHA};
pub use environment::{STANDARD_HUMIDITY_PCT, STANDARD_TEMPERATURE_C};
pub use index::{BAND_SCORE_STEP, MAX_BREAKPOINTS, MAX_CHANNELS};
