//! Index Mapping: Concentration to Sub-Index
//!
//! ## Banding
//!
//! Each channel carries ascending concentration breakpoints
//! `[b0, b1, ..., bn]`. Adjacent pairs form bands; band `i` spans sub-index
//! scores `[50·i, 50·(i+1)]` and is linearly interpolated inside:
//!
//! ```text
//! score = 50 · (i + (ppm - b[i]) / (b[i+1] - b[i]))
//!
//! CO2 [0, 400, 1000, 2000]:
//!   ppm:    0 ──── 400 ──── 1000 ──── 2000
//!   score:  0 ────  50 ────  100 ────  150
//! ```
//!
//! Bands are scanned in ascending order and the first inclusive match
//! wins, so a reading sitting on `b[i+1]` scores `50·(i+1)` from either
//! side: the scale is continuous at every breakpoint.
//!
//! [`Interpolation::Legacy`] reproduces the older firmware's formula,
//! `50 · (i + 1) · (ppm - b[i]) / (b[i+1] - b[i])`. It matches the
//! continuous scale in band 0 and at every band's upper edge, but drops
//! back toward zero just above each interior breakpoint:
//!
//! ```text
//! CO2, ppm 700:   continuous 75,  legacy 50
//! CO2, ppm 1500:  continuous 125, legacy 75
//! ```
//!
//! ## Off the Scale
//!
//! Readings above the top breakpoint are [`BandStatus::Saturated`]. The
//! default [`SaturationPolicy::Clamp`] pins them to the top band's maximum
//! (150 for four breakpoints); reporting 0 would tell the user the air is
//! clean exactly when it is worst. [`SaturationPolicy::ReportZero`] keeps the
//! old firmware's behaviour. Together with [`Interpolation::Legacy`] it
//! reproduces historical uploads score for score.
//!
//! Negative or NaN concentrations are [`BandStatus::BelowRange`] and score 0.

use heapless::Vec;

use crate::{
    constants::{index::MIN_BREAKPOINTS, BAND_SCORE_STEP, MAX_BREAKPOINTS},
    errors::{AqiError, AqiResult},
    traits::Validatable,
    validation::is_strictly_ascending,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to report for a concentration above the top breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SaturationPolicy {
    /// Top band's maximum score
    #[default]
    Clamp,
    /// Zero, as older firmware reported it
    ReportZero,
}

/// How a concentration is placed inside its band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Interpolation {
    /// Band `i` spans `[50·i, 50·(i+1)]`; continuous at every breakpoint
    #[default]
    Continuous,
    /// `50·(i+1)·fraction`, as older firmware computed it
    Legacy,
}

impl Interpolation {
    fn score(self, band: usize, fraction: f32) -> f32 {
        match self {
            Interpolation::Continuous => BAND_SCORE_STEP * (band as f32 + fraction),
            Interpolation::Legacy => BAND_SCORE_STEP * (band + 1) as f32 * fraction,
        }
    }
}

/// Where a concentration fell on the breakpoint scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BandStatus {
    /// Inside band `n` (0-based)
    InBand(u8),
    /// Above the top breakpoint
    Saturated,
    /// Below the first breakpoint, or not a number
    BelowRange,
}

/// Sub-index score for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubIndex {
    /// Score on the 0..=50·(n-1) scale
    pub score: f32,
    /// Band the concentration landed in
    pub status: BandStatus,
}

impl SubIndex {
    /// True if the concentration fell off the top of the scale
    pub fn is_saturated(&self) -> bool {
        self.status == BandStatus::Saturated
    }
}

/// Map `ppm` onto the sub-index scale described by `breakpoints`.
///
/// `breakpoints` must be strictly ascending; [`Breakpoints`] guarantees it.
pub fn to_sub_index(
    ppm: f32,
    breakpoints: &[f32],
    policy: SaturationPolicy,
    interpolation: Interpolation,
) -> SubIndex {
    for (band, pair) in breakpoints.windows(2).enumerate() {
        let (low, high) = (pair[0], pair[1]);
        if ppm >= low && ppm <= high {
            let fraction = (ppm - low) / (high - low);
            return SubIndex {
                score: interpolation.score(band, fraction),
                status: BandStatus::InBand(band as u8),
            };
        }
    }

    match breakpoints.last() {
        Some(&top) if ppm > top && breakpoints.len() >= MIN_BREAKPOINTS => {
            let score = match policy {
                SaturationPolicy::Clamp => top_score(breakpoints.len()),
                SaturationPolicy::ReportZero => 0.0,
            };
            SubIndex { score, status: BandStatus::Saturated }
        }
        _ => SubIndex { score: 0.0, status: BandStatus::BelowRange },
    }
}

/// Highest score a table of `count` breakpoints can produce
fn top_score(count: usize) -> f32 {
    BAND_SCORE_STEP * count.saturating_sub(1) as f32
}

/// Validated, ascending breakpoint table for one channel
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Breakpoints {
    values: Vec<f32, MAX_BREAKPOINTS>,
}

impl Breakpoints {
    /// Table from a slice, validated
    pub fn new(values: &[f32]) -> AqiResult<Self> {
        let values = Vec::from_slice(values).map_err(|_| AqiError::InvalidConfig {
            reason: "too many breakpoints",
        })?;
        let table = Self { values };
        table.validate()?;
        Ok(table)
    }

    /// Table from compiled-in constants; entries past capacity are dropped
    pub(crate) fn from_trusted(values: &[f32]) -> Self {
        let mut table = Vec::new();
        for &value in values.iter().take(MAX_BREAKPOINTS) {
            let _ = table.push(value);
        }
        Self { values: table }
    }

    /// 2..=8 finite entries, strictly ascending, starting at or above zero
    pub fn validate(&self) -> AqiResult<()> {
        if self.values.len() < MIN_BREAKPOINTS {
            return Err(AqiError::InvalidConfig { reason: "need at least two breakpoints" });
        }
        if !self.values.iter().all(|v| v.is_valid()) {
            return Err(AqiError::InvalidConfig { reason: "breakpoints must be finite" });
        }
        if self.values[0] < 0.0 {
            return Err(AqiError::InvalidConfig { reason: "first breakpoint must not be negative" });
        }
        if !is_strictly_ascending(&self.values) {
            return Err(AqiError::InvalidConfig { reason: "breakpoints must be strictly ascending" });
        }
        Ok(())
    }

    /// Raw thresholds
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Highest threshold
    pub fn top(&self) -> f32 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Highest score this table can produce
    pub fn max_score(&self) -> f32 {
        top_score(self.values.len())
    }

    /// Sub-index for `ppm` under `policy`, continuous interpolation
    pub fn sub_index(&self, ppm: f32, policy: SaturationPolicy) -> SubIndex {
        self.sub_index_with(ppm, policy, Interpolation::Continuous)
    }

    /// Sub-index for `ppm` under `policy` and `interpolation`
    pub fn sub_index_with(
        &self,
        ppm: f32,
        policy: SaturationPolicy,
        interpolation: Interpolation,
    ) -> SubIndex {
        to_sub_index(ppm, &self.values, policy, interpolation)
    }

    /// Sub-index for `ppm`, treating saturation as an error
    pub fn sub_index_strict(&self, ppm: f32) -> AqiResult<SubIndex> {
        let index = self.sub_index(ppm, SaturationPolicy::Clamp);
        if index.is_saturated() {
            return Err(AqiError::SaturatedReading { ppm, limit: self.top() });
        }
        Ok(index)
    }
}
