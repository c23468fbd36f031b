//! Sample Acquisition
//!
//! Reduces a burst of raw ADC conversions to one averaged reading.
//!
//! ## Why Average?
//!
//! A MOx sensor behind a 12-bit ADC jitters by tens of counts between
//! consecutive conversions. Averaging a few hundred conversions is the
//! cheapest low-pass filter available and costs no memory: only the running
//! sum is kept.
//!
//! ## Bounded Waits
//!
//! Each conversion gets a deadline measured on the acquirer's
//! [`TimeSource`] and a budget of busy polls. Whichever runs out first
//! ends the wait, so a wedged ADC surfaces as
//! [`AqiError::AcquisitionTimeout`] even when the clock has stopped.
//!
//! ```text
//! for each sample:
//!     start_conversion()
//!     poll_conversion() until Ok | deadline passed | budget spent | fault
//!     sum += read_raw()
//! mean = sum / count   (truncating)
//! ```

use crate::{
    constants::{ADC_MAX, CONVERSION_POLL_BUDGET, CONVERSION_TIMEOUT_MS, GAS_SAMPLE_COUNT},
    errors::{AqiError, AqiResult},
    time::{deadline, TimeSource},
    traits::AnalogInput,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer-truncated mean of a burst of conversions (ADC counts)
pub type AveragedSample = u32;

/// Acquisition settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquisitionConfig {
    /// Conversions averaged per reading
    pub sample_count: u32,
    /// Per-conversion deadline (ms)
    pub conversion_timeout_ms: u64,
    /// Per-conversion limit on busy polls
    pub max_polls: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_count: GAS_SAMPLE_COUNT,
            conversion_timeout_ms: CONVERSION_TIMEOUT_MS,
            max_polls: CONVERSION_POLL_BUDGET,
        }
    }
}

/// Averages raw conversions from an [`AnalogInput`] under a timeout
#[derive(Debug, Clone)]
pub struct SampleAcquirer<T: TimeSource> {
    config: AcquisitionConfig,
    adc_max: u16,
    clock: T,
}

impl<T: TimeSource> SampleAcquirer<T> {
    /// Acquirer for a 12-bit ADC
    pub fn new(config: AcquisitionConfig, clock: T) -> AqiResult<Self> {
        Self::with_adc_max(config, ADC_MAX, clock)
    }

    /// Acquirer for an ADC with a different full scale
    pub fn with_adc_max(config: AcquisitionConfig, adc_max: u16, clock: T) -> AqiResult<Self> {
        if config.sample_count == 0 {
            return Err(AqiError::InvalidConfig {
                reason: "sample count must be at least 1",
            });
        }
        if adc_max == 0 {
            return Err(AqiError::InvalidConfig {
                reason: "ADC full scale must be positive",
            });
        }
        if config.max_polls == 0 {
            return Err(AqiError::InvalidConfig {
                reason: "poll budget must be at least 1",
            });
        }

        Ok(Self { config, adc_max, clock })
    }

    /// Settings in use
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Average `sample_count` conversions from `input`
    pub fn acquire<A: AnalogInput>(&self, input: &mut A) -> AqiResult<AveragedSample> {
        self.acquire_n(input, self.config.sample_count)
    }

    /// Average an explicit number of conversions from `input`
    pub fn acquire_n<A: AnalogInput>(&self, input: &mut A, sample_count: u32) -> AqiResult<AveragedSample> {
        if sample_count == 0 {
            return Err(AqiError::InvalidConfig {
                reason: "sample count must be at least 1",
            });
        }

        let mut sum: u64 = 0;

        for completed in 0..sample_count {
            input.start_conversion();
            self.wait_for_conversion(input, completed, sample_count)?;

            let raw = input.read_raw();
            if raw > self.adc_max {
                log_trace!("ADC returned {} above full scale {}, saturating", raw, self.adc_max);
            }
            sum += u64::from(raw.min(self.adc_max));
        }

        Ok((sum / u64::from(sample_count)) as AveragedSample)
    }

    fn wait_for_conversion<A: AnalogInput>(
        &self,
        input: &mut A,
        completed: u32,
        requested: u32,
    ) -> AqiResult<()> {
        let deadline = deadline(self.clock.now(), self.config.conversion_timeout_ms);
        let mut busy_polls: u32 = 0;

        loop {
            match input.poll_conversion() {
                Ok(()) => return Ok(()),
                Err(nb::Error::Other(_)) => {
                    return Err(AqiError::SensorFault {
                        reason: "ADC reported a conversion fault",
                    });
                }
                Err(nb::Error::WouldBlock) => {
                    busy_polls = busy_polls.saturating_add(1);
                    if busy_polls >= self.config.max_polls || self.clock.now() > deadline {
                        log_warn!(
                            "ADC conversion stalled after {} of {} samples",
                            completed, requested
                        );
                        return Err(AqiError::AcquisitionTimeout { completed, requested });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{FixedTime, SteppingTime};

    /// Replays a fixed list of readings; each conversion is busy for `busy_polls`
    struct ScriptedAdc {
        readings: &'static [u16],
        next: usize,
        busy_polls: u32,
        remaining_busy: u32,
        started: u32,
        /// Conversions after this many never complete
        stall_after: Option<u32>,
    }

    impl ScriptedAdc {
        fn new(readings: &'static [u16], busy_polls: u32) -> Self {
            Self {
                readings,
                next: 0,
                busy_polls,
                remaining_busy: 0,
                started: 0,
                stall_after: None,
            }
        }
    }

    impl AnalogInput for ScriptedAdc {
        type Error = ();

        fn start_conversion(&mut self) {
            self.started += 1;
            self.remaining_busy = self.busy_polls;
        }

        fn poll_conversion(&mut self) -> nb::Result<(), ()> {
            if self.stall_after.map_or(false, |limit| self.started > limit) {
                Err(nb::Error::WouldBlock)
            } else if self.remaining_busy > 0 {
                self.remaining_busy -= 1;
                Err(nb::Error::WouldBlock)
            } else {
                Ok(())
            }
        }

        fn read_raw(&mut self) -> u16 {
            let value = self.readings[self.next % self.readings.len()];
            self.next += 1;
            value
        }
    }

    struct StuckAdc;

    impl AnalogInput for StuckAdc {
        type Error = ();

        fn start_conversion(&mut self) {}

        fn poll_conversion(&mut self) -> nb::Result<(), ()> {
            Err(nb::Error::WouldBlock)
        }

        fn read_raw(&mut self) -> u16 {
            0
        }
    }

    fn config(sample_count: u32) -> AcquisitionConfig {
        AcquisitionConfig { sample_count, conversion_timeout_ms: 10, max_polls: 1_000 }
    }

    #[test]
    fn averages_and_truncates() {
        let acquirer = SampleAcquirer::new(config(4), FixedTime::new(0)).unwrap();
        let mut adc = ScriptedAdc::new(&[100, 101, 101, 101], 0);

        // 403 / 4 = 100.75 -> 100
        assert_eq!(acquirer.acquire(&mut adc).unwrap(), 100);
        assert_eq!(adc.next, 4);
    }

    #[test]
    fn tolerates_busy_conversions_within_deadline() {
        let acquirer = SampleAcquirer::new(config(3), SteppingTime::new(0, 1)).unwrap();
        let mut adc = ScriptedAdc::new(&[2048], 5);

        assert_eq!(acquirer.acquire(&mut adc).unwrap(), 2048);
    }

    #[test]
    fn stuck_conversion_times_out() {
        let acquirer = SampleAcquirer::new(config(500), SteppingTime::new(0, 1)).unwrap();

        let result = acquirer.acquire(&mut StuckAdc);
        assert_eq!(
            result,
            Err(AqiError::AcquisitionTimeout { completed: 0, requested: 500 })
        );
    }

    #[test]
    fn stuck_conversion_times_out_on_frozen_clock() {
        let acquirer = SampleAcquirer::new(config(1), FixedTime::new(0)).unwrap();

        let result = acquirer.acquire(&mut StuckAdc);
        assert_eq!(
            result,
            Err(AqiError::AcquisitionTimeout { completed: 0, requested: 1 })
        );
    }

    #[test]
    fn poll_budget_allows_slow_conversions() {
        let acquirer = SampleAcquirer::new(config(2), FixedTime::new(0)).unwrap();
        let mut adc = ScriptedAdc::new(&[1500], 999);

        assert_eq!(acquirer.acquire(&mut adc).unwrap(), 1500);

        let mut slower = ScriptedAdc::new(&[1500], 1_000);
        assert_eq!(
            acquirer.acquire(&mut slower),
            Err(AqiError::AcquisitionTimeout { completed: 0, requested: 2 })
        );
    }

    #[test]
    fn zero_poll_budget_rejected() {
        let config = AcquisitionConfig { max_polls: 0, ..AcquisitionConfig::default() };
        assert!(SampleAcquirer::new(config, FixedTime::new(0)).is_err());
    }

    #[test]
    fn partial_burst_reports_progress() {
        let acquirer = SampleAcquirer::new(config(8), SteppingTime::new(0, 1)).unwrap();
        let mut adc = ScriptedAdc::new(&[1000], 0);
        adc.stall_after = Some(3);

        let result = acquirer.acquire(&mut adc);
        assert_eq!(
            result,
            Err(AqiError::AcquisitionTimeout { completed: 3, requested: 8 })
        );
    }

    #[test]
    fn fault_is_surfaced() {
        struct FaultyAdc;
        impl AnalogInput for FaultyAdc {
            type Error = &'static str;
            fn start_conversion(&mut self) {}
            fn poll_conversion(&mut self) -> nb::Result<(), &'static str> {
                Err(nb::Error::Other("overrun"))
            }
            fn read_raw(&mut self) -> u16 {
                0
            }
        }

        let acquirer = SampleAcquirer::new(config(1), FixedTime::new(0)).unwrap();
        assert!(matches!(
            acquirer.acquire(&mut FaultyAdc),
            Err(AqiError::SensorFault { .. })
        ));
    }

    #[test]
    fn readings_above_full_scale_are_saturated() {
        let acquirer = SampleAcquirer::new(config(2), FixedTime::new(0)).unwrap();
        let mut adc = ScriptedAdc::new(&[5000, 4095], 0);

        assert_eq!(acquirer.acquire(&mut adc).unwrap(), 4095);
    }

    #[test]
    fn zero_samples_rejected() {
        assert!(SampleAcquirer::new(config(0), FixedTime::new(0)).is_err());

        let acquirer = SampleAcquirer::new(config(1), FixedTime::new(0)).unwrap();
        let mut adc = ScriptedAdc::new(&[1], 0);
        assert!(acquirer.acquire_n(&mut adc, 0).is_err());
    }
}
