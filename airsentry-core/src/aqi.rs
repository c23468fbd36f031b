//! Composite reduction
//!
//! The overall index is the worst channel's sub-index, as in the EPA AQI:
//! one bad pollutant makes the air bad no matter how clean the rest is.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Overall index of one read cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompositeAqi {
    /// Highest sub-index
    pub aqi: f32,
    /// Position of the channel that produced it (first one on ties)
    pub dominant: Option<usize>,
}

impl CompositeAqi {
    /// Health band of the composite score
    pub fn category(&self) -> AqiCategory {
        AqiCategory::from_score(self.aqi)
    }
}

/// Maximum of the per-channel sub-indices. An empty set reduces to 0.
pub fn reduce(sub_indices: &[f32]) -> CompositeAqi {
    let mut composite = CompositeAqi { aqi: 0.0, dominant: None };

    for (position, &score) in sub_indices.iter().enumerate() {
        if composite.dominant.is_none() || score > composite.aqi {
            composite = CompositeAqi { aqi: score, dominant: Some(position) };
        }
    }

    composite
}

/// EPA health bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AqiCategory {
    /// 0 - 50
    Good,
    /// 51 - 100
    Moderate,
    /// 101 - 150
    UnhealthyForSensitiveGroups,
    /// 151 - 200
    Unhealthy,
    /// 201 - 300
    VeryUnhealthy,
    /// Above 300
    Hazardous,
}

impl AqiCategory {
    /// Band containing `score`; band edges belong to the lower band
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s <= 50.0 => AqiCategory::Good,
            s if s <= 100.0 => AqiCategory::Moderate,
            s if s <= 150.0 => AqiCategory::UnhealthyForSensitiveGroups,
            s if s <= 200.0 => AqiCategory::Unhealthy,
            s if s <= 300.0 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_exact_maximum() {
        let composite = reduce(&[12.5, 48.0, 3.0, 0.0]);
        assert_eq!(composite.aqi, 48.0);
        assert_eq!(composite.dominant, Some(1));
    }

    #[test]
    fn ties_go_to_first_channel() {
        let composite = reduce(&[10.0, 150.0, 150.0]);
        assert_eq!(composite.dominant, Some(1));
    }

    #[test]
    fn all_zero_still_has_a_dominant_channel() {
        let composite = reduce(&[0.0, 0.0]);
        assert_eq!(composite.aqi, 0.0);
        assert_eq!(composite.dominant, Some(0));
    }

    #[test]
    fn empty_reduces_to_zero() {
        let composite = reduce(&[]);
        assert_eq!(composite.aqi, 0.0);
        assert_eq!(composite.dominant, None);
    }

    #[test]
    fn categories() {
        assert_eq!(AqiCategory::from_score(0.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_score(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_score(50.5), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_score(150.0), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(AqiCategory::from_score(350.0), AqiCategory::Hazardous);
        assert_eq!(reduce(&[14.6]).category(), AqiCategory::Good);
    }
}
