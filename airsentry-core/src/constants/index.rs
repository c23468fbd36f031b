//! Sub-Index Scale

/// Score span of one breakpoint band. Band `i` covers `[i * 50, (i + 1) * 50]`.
pub const BAND_SCORE_STEP: f32 = 50.0;

/// Largest breakpoint table a channel may carry.
pub const MAX_BREAKPOINTS: usize = 8;

/// Smallest breakpoint table that still forms one band.
pub const MIN_BREAKPOINTS: usize = 2;

/// Largest number of gas channels in one configuration.
pub const MAX_CHANNELS: usize = 8;
