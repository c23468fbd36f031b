//! Environmental Compensation Parameters
//!
//! MOx sensitivity drifts with ambient conditions. The correction is a
//! linear factor per variable around a reference point:
//!
//! ```text
//! factor = (1 + TEMP_COEFF * (T - T_ref)) * (1 + HUMIDITY_COEFF * (H - H_ref))
//! ```

/// Reference temperature (°C). Compensation is a no-op here.
pub const STANDARD_TEMPERATURE_C: f32 = 25.0;

/// Reference relative humidity (%). Compensation is a no-op here.
pub const STANDARD_HUMIDITY_PCT: f32 = 50.0;

/// Fractional concentration change per °C away from the reference.
pub const TEMPERATURE_COEFF_PER_C: f32 = 0.02;

/// Fractional concentration change per %RH away from the reference.
pub const HUMIDITY_COEFF_PER_PCT: f32 = 0.01;

// ===== PLAUSIBLE AMBIENT RANGES =====

/// Coldest ambient temperature accepted from an environment sensor (°C).
///
/// Source: DHT22 / SHT3x operating range
pub const AMBIENT_TEMP_MIN_C: f32 = -40.0;

/// Hottest ambient temperature accepted from an environment sensor (°C).
pub const AMBIENT_TEMP_MAX_C: f32 = 85.0;

/// Minimum relative humidity (%).
pub const AMBIENT_HUMIDITY_MIN_PCT: f32 = 0.0;

/// Maximum relative humidity (%).
pub const AMBIENT_HUMIDITY_MAX_PCT: f32 = 100.0;
