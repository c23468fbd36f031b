//! Sampling and Filtering Defaults

/// Conversions averaged per gas reading.
///
/// MOx sensors are noisy at the ADC level; 500 conversions at 12 bits
/// settle the mean to well under one count.
pub const GAS_SAMPLE_COUNT: u32 = 500;

/// Longest a single conversion may stay busy before acquisition gives up (ms).
///
/// A 12-bit conversion completes in microseconds; anything near this
/// bound means the ADC is wedged.
pub const CONVERSION_TIMEOUT_MS: u64 = 10;

/// Most busy polls a single conversion may take, whatever the clock says.
///
/// Bounds the wait even when the time source has stopped ticking.
pub const CONVERSION_POLL_BUDGET: u32 = 100_000;

/// Weight of the newest resistance sample in exponential smoothing.
///
/// 0.2 gives a time constant of roughly 4.5 read cycles.
pub const SMOOTHING_ALPHA: f32 = 0.2;
