//! Air-quality read cycle
//!
//! Wires the stages together in sensor order:
//!
//! ```text
//! AnalogInput ─► acquire ─► to_resistance ─► smooth ─┬─► CO2   ppm ─► compensate ─► sub-index ─┐
//!                                                    ├─► Smoke ppm ─► compensate ─► sub-index ─┤
//!                                                    ├─► NOx   ppm ─► compensate ─► sub-index ─┼─► reduce ─► AQI
//!                                                    └─► O3    ppm ─► compensate ─► sub-index ─┘
//! ```
//!
//! The monitor itself is immutable. The only state that survives between
//! cycles is the [`ExponentialSmoother`], which the caller owns and lends
//! to every [`AirQualityMonitor::read`].
//!
//! ## Failure Policy
//!
//! - Acquisition timeouts and ADC faults abort the cycle.
//! - A rail reading (0 or full scale) reuses the last smoothed resistance
//!   and marks the report `stale`; before the first good reading there is
//!   nothing to reuse and the cycle fails with `InvalidReading`.
//! - A misbehaving environment source falls back to standard conditions.

use heapless::Vec;

use crate::{
    acquisition::{AveragedSample, SampleAcquirer},
    aqi::{reduce, AqiCategory},
    compensation::{compensate, EnvironmentalConditions},
    config::{Gas, SensorConfig},
    constants::MAX_CHANNELS,
    errors::{AqiError, AqiResult},
    index::SubIndex,
    resistance::{Resistance, ResistanceModel},
    smoothing::ExponentialSmoother,
    time::TimeSource,
    traits::{AnalogInput, EnvironmentSource},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One gas channel's share of a report
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChannelReading {
    /// Which pollutant
    pub gas: Gas,
    /// Concentration straight off the curve (ppm)
    pub raw_ppm: f32,
    /// Concentration after temperature / humidity compensation (ppm)
    pub ppm: f32,
    /// Score on the channel's breakpoint scale
    pub sub_index: SubIndex,
}

/// Everything one read cycle produced
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AqiReport {
    /// Averaged ADC counts (absent when evaluated from a resistance)
    pub raw_average: Option<AveragedSample>,
    /// Resistance of this cycle's reading (absent if it was rejected)
    pub resistance: Option<Resistance>,
    /// Smoothed resistance the concentrations were computed from
    pub smoothed_resistance: Resistance,
    /// Conditions used for compensation
    pub conditions: EnvironmentalConditions,
    /// Per-gas breakdown, in configuration order
    pub channels: Vec<ChannelReading, MAX_CHANNELS>,
    /// Composite index: the worst sub-index
    pub aqi: f32,
    /// Gas that set the composite index
    pub dominant: Option<Gas>,
    /// True if this cycle's reading was rejected and the last smoothed
    /// resistance was reused
    pub stale: bool,
}

impl AqiReport {
    /// Health band of the composite index
    pub fn category(&self) -> AqiCategory {
        AqiCategory::from_score(self.aqi)
    }

    /// Breakdown for one gas
    pub fn channel(&self, gas: Gas) -> Option<&ChannelReading> {
        self.channels.iter().find(|reading| reading.gas == gas)
    }

    /// True if any channel ran off the top of its scale
    pub fn any_saturated(&self) -> bool {
        self.channels.iter().any(|reading| reading.sub_index.is_saturated())
    }
}

/// Runs read cycles against one gas sensor
#[derive(Debug, Clone)]
pub struct AirQualityMonitor<T: TimeSource> {
    config: SensorConfig,
    acquirer: SampleAcquirer<T>,
    resistance: ResistanceModel,
}

impl<T: TimeSource> AirQualityMonitor<T> {
    /// Monitor for a validated configuration, timing conversions on `clock`
    pub fn new(config: SensorConfig, clock: T) -> AqiResult<Self> {
        config.validate()?;

        let acquirer = SampleAcquirer::with_adc_max(config.acquisition, config.circuit.adc_max, clock)?;
        let resistance = ResistanceModel::new(config.circuit)?;

        Ok(Self { config, acquirer, resistance })
    }

    /// Configuration in use
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Fresh smoother with the configured weight
    pub fn smoother(&self) -> AqiResult<ExponentialSmoother> {
        ExponentialSmoother::new(self.config.smoothing_alpha)
    }

    /// Full cycle: sample the sensor, then [`process`](Self::process) the average
    pub fn read<A, E>(
        &self,
        input: &mut A,
        environment: &E,
        smoother: &mut ExponentialSmoother,
    ) -> AqiResult<AqiReport>
    where
        A: AnalogInput,
        E: EnvironmentSource + ?Sized,
    {
        let counts = self.acquirer.acquire(input)?;
        self.process(counts, environment, smoother)
    }

    /// Everything after acquisition, starting from averaged ADC counts
    pub fn process<E>(
        &self,
        counts: AveragedSample,
        environment: &E,
        smoother: &mut ExponentialSmoother,
    ) -> AqiResult<AqiReport>
    where
        E: EnvironmentSource + ?Sized,
    {
        let (resistance, smoothed, stale) = match self.resistance.to_resistance(counts) {
            Ok(resistance) => (Some(resistance), smoother.smooth(resistance), false),
            Err(err @ AqiError::InvalidReading { .. }) => {
                if !smoother.is_primed() {
                    return Err(err);
                }
                log_warn!(
                    "Rejected reading of {} counts, reusing smoothed resistance {}",
                    counts,
                    smoother.value()
                );
                (None, smoother.value(), true)
            }
            Err(err) => return Err(err),
        };

        let conditions = self.conditions(environment);

        let mut report = self.evaluate(smoothed, conditions)?;
        report.raw_average = Some(counts);
        report.resistance = resistance;
        report.stale = stale;

        log_debug!(
            "AQI {} from {} counts (Rs {} kOhm smoothed)",
            report.aqi,
            counts,
            report.smoothed_resistance
        );

        Ok(report)
    }

    /// Concentrations, sub-indices and composite for a smoothed resistance.
    ///
    /// Pure: no hardware, no smoother update.
    pub fn evaluate(
        &self,
        smoothed_resistance: Resistance,
        conditions: EnvironmentalConditions,
    ) -> AqiResult<AqiReport> {
        let r0 = self.config.circuit.r0_kohm;
        let mut channels: Vec<ChannelReading, MAX_CHANNELS> = Vec::new();
        let mut scores: Vec<f32, MAX_CHANNELS> = Vec::new();

        for channel in &self.config.channels {
            let raw_ppm = channel.curve().ppm(smoothed_resistance, r0)?;
            let ppm = compensate(raw_ppm, conditions.temperature_c, conditions.humidity_pct);
            let sub_index = channel.breakpoints.sub_index_with(
                ppm,
                self.config.saturation,
                self.config.interpolation,
            );

            if sub_index.is_saturated() {
                log_warn!(
                    "{} at {} ppm is above its top breakpoint {}",
                    channel.gas.as_str(),
                    ppm,
                    channel.breakpoints.top()
                );
            }

            // Both vectors share the channel table's capacity
            let _ = scores.push(sub_index.score);
            let _ = channels.push(ChannelReading {
                gas: channel.gas,
                raw_ppm,
                ppm,
                sub_index,
            });
        }

        let composite = reduce(&scores);
        let dominant = composite.dominant.map(|position| channels[position].gas);

        Ok(AqiReport {
            raw_average: None,
            resistance: None,
            smoothed_resistance,
            conditions,
            channels,
            aqi: composite.aqi,
            dominant,
            stale: false,
        })
    }

    fn conditions<E: EnvironmentSource + ?Sized>(&self, environment: &E) -> EnvironmentalConditions {
        match environment.conditions().and_then(|c| c.validate().map(|_| c)) {
            Ok(conditions) => conditions,
            Err(_err) => {
                log_warn!("Environment reading unusable, assuming 25 C / 50 %RH");
                EnvironmentalConditions::STANDARD
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compensation::{FixedEnvironment, StandardEnvironment},
        index::{Interpolation, SaturationPolicy},
        time::FixedTime,
    };

    fn monitor(saturation: SaturationPolicy) -> AirQualityMonitor<FixedTime> {
        let config = SensorConfig { saturation, ..SensorConfig::default() };
        AirQualityMonitor::new(config, FixedTime::new(0)).unwrap()
    }

    #[test]
    fn evaluate_at_r0_reads_scale_constants() {
        let report = monitor(SaturationPolicy::Clamp)
            .evaluate(10.0, EnvironmentalConditions::STANDARD)
            .unwrap();

        let co2 = report.channel(Gas::Co2).unwrap();
        assert!((co2.ppm - 116.602).abs() < 1e-2);
        assert_eq!(co2.ppm, co2.raw_ppm);
        // 116.6 / 400 * 50
        assert!((co2.sub_index.score - 14.575).abs() < 1e-2);

        // NOx (1.5 ppm) and O3 (0.5 ppm) sit above their top breakpoints
        assert!(report.channel(Gas::Nox).unwrap().sub_index.is_saturated());
        assert!(report.channel(Gas::O3).unwrap().sub_index.is_saturated());
        assert_eq!(report.aqi, 150.0);
        assert_eq!(report.dominant, Some(Gas::Nox));
    }

    #[test]
    fn legacy_policy_lets_co2_dominate() {
        let report = monitor(SaturationPolicy::ReportZero)
            .evaluate(10.0, EnvironmentalConditions::STANDARD)
            .unwrap();

        assert!((report.aqi - 14.575).abs() < 1e-2);
        assert_eq!(report.dominant, Some(Gas::Co2));
    }

    #[test]
    fn legacy_interpolation_reaches_the_report() {
        let mut config = SensorConfig { saturation: SaturationPolicy::ReportZero, ..SensorConfig::default() };
        config.interpolation = Interpolation::Legacy;
        let monitor = AirQualityMonitor::new(config, FixedTime::new(0)).unwrap();

        // Rs for ~700 ppm CO2, halfway through band 1
        let report = monitor.evaluate(5.2347, EnvironmentalConditions::STANDARD).unwrap();
        let co2 = report.channel(Gas::Co2).unwrap();

        assert!((co2.ppm - 700.0).abs() < 1.0);
        assert!((co2.sub_index.score - 50.0).abs() < 0.2);
    }

    #[test]
    fn first_rail_reading_fails() {
        let monitor = monitor(SaturationPolicy::Clamp);
        let mut smoother = monitor.smoother().unwrap();

        let result = monitor.process(0, &StandardEnvironment, &mut smoother);
        assert_eq!(result, Err(AqiError::InvalidReading { raw: 0 }));
        assert!(!smoother.is_primed());
    }

    #[test]
    fn rail_reading_after_good_one_reuses_state() {
        let monitor = monitor(SaturationPolicy::Clamp);
        let mut smoother = monitor.smoother().unwrap();

        let good = monitor.process(2048, &StandardEnvironment, &mut smoother).unwrap();
        assert!(!good.stale);

        let reused = monitor.process(4095, &StandardEnvironment, &mut smoother).unwrap();
        assert!(reused.stale);
        assert_eq!(reused.resistance, None);
        assert_eq!(reused.smoothed_resistance, good.smoothed_resistance);
        assert_eq!(smoother.updates(), 1);
    }

    #[test]
    fn broken_environment_falls_back_to_standard() {
        let monitor = monitor(SaturationPolicy::Clamp);
        let mut smoother = monitor.smoother().unwrap();
        let broken = FixedEnvironment(EnvironmentalConditions::new(f32::NAN, 50.0));

        let report = monitor.process(2048, &broken, &mut smoother).unwrap();
        assert_eq!(report.conditions, EnvironmentalConditions::STANDARD);
    }

    #[test]
    fn compensation_feeds_sub_index() {
        let monitor = monitor(SaturationPolicy::Clamp);
        let warm = EnvironmentalConditions::new(35.0, 50.0);

        let report = monitor.evaluate(10.0, warm).unwrap();
        let co2 = report.channel(Gas::Co2).unwrap();
        assert!((co2.ppm - co2.raw_ppm * 1.2).abs() < 1e-2);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = SensorConfig::default();
        config.smoothing_alpha = 2.0;
        assert!(AirQualityMonitor::new(config, FixedTime::new(0)).is_err());
    }
}
