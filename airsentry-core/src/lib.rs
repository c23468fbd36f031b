//! Core air-quality pipeline for AirSentry
//!
//! Turns raw analog readings from an MQ135-class gas sensor into a single
//! composite air-quality index (AQI). Designed for the same microcontrollers
//! that host the sensor.
//!
//! Pipeline, leaf-first:
//! - Sample acquisition: average N conversions, bounded by a timeout
//! - Resistance model: ADC counts to sensing-element resistance
//! - Temporal smoothing: single-pole IIR filter over the resistance stream
//! - Concentration model: per-gas power-law curve, resistance to PPM
//! - Environmental compensation: temperature / humidity correction
//! - Index mapping: piecewise-linear PPM to sub-index
//! - Composite reduction: worst sub-index wins
//!
//! Key constraints:
//! - No heap allocation in the read path
//! - No hidden global state (the smoother is owned by the caller)
//! - Hardware is reached only through the traits in [`traits`]
//!
//! ```no_run
//! use airsentry_core::{AirQualityMonitor, SensorConfig};
//! use airsentry_core::compensation::StandardEnvironment;
//! use airsentry_core::time::SystemTime;
//! # struct BoardAdc;
//! # impl airsentry_core::traits::AnalogInput for BoardAdc {
//! #     type Error = ();
//! #     fn start_conversion(&mut self) {}
//! #     fn poll_conversion(&mut self) -> nb::Result<(), ()> { Ok(()) }
//! #     fn read_raw(&mut self) -> u16 { 2048 }
//! # }
//!
//! let monitor = AirQualityMonitor::new(SensorConfig::default(), SystemTime)?;
//! let mut smoother = monitor.smoother()?;
//! let mut sensor = BoardAdc;
//!
//! loop {
//!     match monitor.read(&mut sensor, &StandardEnvironment, &mut smoother) {
//!         Ok(_report) => {} // hand report.aqi to the uplink
//!         Err(e) if e.is_hardware() => break,
//!         Err(_) => {}     // skip this cycle
//!     }
//! }
//! # Ok::<(), airsentry_core::AqiError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod acquisition;
pub mod aqi;
pub mod compensation;
pub mod concentration;
pub mod config;
pub mod constants;
pub mod errors;
pub mod index;
pub mod monitor;
pub mod resistance;
pub mod smoothing;
pub mod time;
pub mod traits;
pub mod validation;

// Public API
pub use aqi::{reduce, AqiCategory, CompositeAqi};
pub use config::{ChannelConfig, Gas, SensorConfig};
pub use errors::{AqiError, AqiResult};
pub use index::{BandStatus, Breakpoints, Interpolation, SaturationPolicy, SubIndex};
pub use monitor::{AirQualityMonitor, AqiReport, ChannelReading};
pub use smoothing::ExponentialSmoother;

/// Crate version, as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
