//! Common test utilities for integration tests
//!
//! This module provides:
//! - Fake ADC channels (noisy, scripted, stuck, faulty)
//! - Ambient sources that fail on demand
//! - A deterministic RNG for sensor noise
//! - Float tolerance assertions

#![allow(dead_code)]

use airsentry_core::{
    compensation::EnvironmentalConditions,
    errors::{AqiError, AqiResult},
    traits::{AnalogInput, EnvironmentSource},
};

/// Deterministic random number generator for tests
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// ADC that reads a fixed level plus symmetric noise of `±amplitude` counts
pub struct NoisyAdc {
    pub level: u16,
    pub amplitude: u16,
    pub conversions: u32,
    rng: TestRng,
}

impl NoisyAdc {
    pub fn new(level: u16, amplitude: u16, seed: u32) -> Self {
        Self { level, amplitude, conversions: 0, rng: TestRng::new(seed) }
    }

    pub fn steady(level: u16) -> Self {
        Self::new(level, 0, 1)
    }
}

impl AnalogInput for NoisyAdc {
    type Error = ();

    fn start_conversion(&mut self) {
        self.conversions += 1;
    }

    fn poll_conversion(&mut self) -> nb::Result<(), ()> {
        Ok(())
    }

    fn read_raw(&mut self) -> u16 {
        if self.amplitude == 0 {
            return self.level;
        }
        let span = u32::from(self.amplitude) * 2 + 1;
        let offset = (self.rng.next_u32() % span) as i32 - i32::from(self.amplitude);
        (i32::from(self.level) + offset).clamp(0, 4095) as u16
    }
}

/// ADC that replays a list of levels, one per read cycle
pub struct ScriptedAdc {
    levels: Vec<u16>,
    cycle: usize,
    per_cycle: u32,
    served: u32,
}

impl ScriptedAdc {
    /// Each level is served for `per_cycle` conversions
    pub fn new(levels: &[u16], per_cycle: u32) -> Self {
        Self { levels: levels.to_vec(), cycle: 0, per_cycle, served: 0 }
    }
}

impl AnalogInput for ScriptedAdc {
    type Error = ();

    fn start_conversion(&mut self) {}

    fn poll_conversion(&mut self) -> nb::Result<(), ()> {
        Ok(())
    }

    fn read_raw(&mut self) -> u16 {
        let level = self.levels[self.cycle.min(self.levels.len() - 1)];
        self.served += 1;
        if self.served == self.per_cycle {
            self.served = 0;
            self.cycle += 1;
        }
        level
    }
}

/// ADC whose conversions never finish
pub struct StuckAdc;

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

/// ADC that reports a hardware fault on every poll
pub struct FaultyAdc;

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

/// Ambient sensor that has dropped off the bus
pub struct OfflineEnvironment;

impl EnvironmentSource for OfflineEnvironment {
    fn conditions(&self) -> AqiResult<EnvironmentalConditions> {
        Err(AqiError::SensorFault { reason: "ambient sensor not responding" })
    }
}

/// ADC level whose averaged reading maps to `resistance` kOhm with a 10 kOhm load
pub fn counts_for_resistance(resistance: f32) -> u16 {
    // Rs = (ADC_MAX / counts - 1) * R_LOAD
    (4095.0 / (resistance / 10.0 + 1.0)).round() as u16
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}
