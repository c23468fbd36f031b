//! Exponential smoothing over the resistance stream
//!
//! Single-pole IIR low-pass:
//!
//! ```text
//! y[n] = α·x[n] + (1 - α)·y[n-1],   y[-1] = 0
//! ```
//!
//! One smoother serves every gas channel because all channels derive from
//! the same resistance. The zero prior is kept on purpose: the first output
//! is `α·x`, and the filter needs about `ln(0.01)/ln(1-α)` calls (21 at
//! α = 0.2) to get within 1% of a steady input.
//!
//! The caller owns the smoother and passes it into each read cycle, so
//! tests get a fresh filter each and a long-running monitor can `reset()`
//! after the sensor is swapped.

use crate::{
    constants::SMOOTHING_ALPHA,
    errors::{AqiError, AqiResult},
    traits::Validatable,
};

/// Exponential smoothing filter with explicit state
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialSmoother {
    alpha: f32,
    value: f32,
    updates: u32,
}

impl Default for ExponentialSmoother {
    fn default() -> Self {
        Self {
            alpha: SMOOTHING_ALPHA,
            value: 0.0,
            updates: 0,
        }
    }
}

impl ExponentialSmoother {
    /// Filter with weight `alpha` on each new sample, `0 < alpha <= 1`
    pub fn new(alpha: f32) -> AqiResult<Self> {
        if !alpha.is_valid() || alpha <= 0.0 || alpha > 1.0 {
            return Err(AqiError::InvalidConfig {
                reason: "smoothing alpha must be in (0, 1]",
            });
        }

        Ok(Self {
            alpha,
            value: 0.0,
            updates: 0,
        })
    }

    /// Absorb a new sample and return the smoothed value
    pub fn smooth(&mut self, sample: f32) -> f32 {
        self.value = self.alpha * sample + (1.0 - self.alpha) * self.value;
        self.updates = self.updates.saturating_add(1);
        self.value
    }

    /// Current smoothed value (0 before the first sample)
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Smoothing weight
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True once at least one sample has been absorbed
    pub fn is_primed(&self) -> bool {
        self.updates > 0
    }

    /// Samples absorbed since construction or the last reset
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Back to the zero prior
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.updates = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_output_is_biased_by_alpha() {
        let mut filter = ExponentialSmoother::default();
        assert!(!filter.is_primed());

        let first = filter.smooth(10.0);
        assert!((first - 2.0).abs() < 1e-6);
        assert!(filter.is_primed());
    }

    #[test]
    fn recurrence() {
        let mut filter = ExponentialSmoother::new(0.2).unwrap();
        filter.smooth(10.0); // 2.0
        let second = filter.smooth(10.0); // 0.2*10 + 0.8*2
        assert!((second - 3.6).abs() < 1e-5);
    }

    #[test]
    fn converges_within_one_percent_in_21_steps() {
        let mut filter = ExponentialSmoother::default();
        let target = 10.0;
        let mut last = 0.0;

        for step in 1..=21 {
            let out = filter.smooth(target);
            assert!(out > last, "step {step} not monotonic");
            assert!(out <= target);
            last = out;
        }

        assert!((target - last) / target < 0.01);
    }

    #[test]
    fn alpha_one_passes_through() {
        let mut filter = ExponentialSmoother::new(1.0).unwrap();
        assert_eq!(filter.smooth(7.5), 7.5);
        assert_eq!(filter.smooth(3.0), 3.0);
    }

    #[test]
    fn reset_restores_zero_prior() {
        let mut filter = ExponentialSmoother::default();
        filter.smooth(10.0);
        filter.smooth(10.0);

        filter.reset();
        assert_eq!(filter.value(), 0.0);
        assert_eq!(filter.updates(), 0);
        assert!((filter.smooth(10.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_alpha_rejected() {
        assert!(ExponentialSmoother::new(0.0).is_err());
        assert!(ExponentialSmoother::new(1.5).is_err());
        assert!(ExponentialSmoother::new(f32::NAN).is_err());
    }
}
