//! MQ135 Gas Response Curves
//!
//! Each gas follows `ppm = a * (Rs / R0)^b`, fitted to the sensitivity
//! curves in the MQ135 datasheet. All exponents are negative: resistance
//! falls as concentration rises.
//!
//! Breakpoints are the concentration thresholds between sub-index bands,
//! ascending and starting at zero.

// ===== CARBON DIOXIDE =====

/// CO2 curve scale (ppm at Rs == R0).
pub const CO2_PPM_CONST: f32 = 116.602_068;

/// CO2 curve exponent.
pub const CO2_EXPONENT: f32 = -2.769_034_9;

/// CO2 breakpoints (ppm).
pub const CO2_BREAKPOINTS: [f32; 4] = [0.0, 400.0, 1000.0, 2000.0];

// ===== SMOKE =====

/// Smoke curve scale.
pub const SMOKE_PPM_CONST: f32 = 2.3;

/// Smoke curve exponent.
pub const SMOKE_EXPONENT: f32 = -1.497;

/// Smoke breakpoints (ppm).
pub const SMOKE_BREAKPOINTS: [f32; 4] = [0.0, 50.0, 150.0, 300.0];

// ===== NITROGEN OXIDES =====

/// NOx curve scale.
pub const NOX_PPM_CONST: f32 = 1.5;

/// NOx curve exponent.
pub const NOX_EXPONENT: f32 = -0.8;

/// NOx breakpoints (ppm).
pub const NOX_BREAKPOINTS: [f32; 4] = [0.0, 0.1, 0.2, 1.0];

// ===== OZONE =====

/// O3 curve scale.
pub const O3_PPM_CONST: f32 = 0.5;

/// O3 curve exponent.
pub const O3_EXPONENT: f32 = -1.15;

/// O3 breakpoints (ppm).
pub const O3_BREAKPOINTS: [f32; 4] = [0.0, 0.05, 0.1, 0.2];
