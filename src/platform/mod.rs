//! Platform abstraction layer
//!
//! The accelerometer sits outside the core. Hosts implement `TiltSensor` over
//! the real device; the sources here feed tests and the headless runner.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Per-tick accelerometer read
pub trait TiltSensor {
    /// Most recent sample in g, or `None` if the sensor has nothing yet
    fn sample(&mut self) -> Option<Vec3>;
}

/// Replays a fixed list of samples, then reports nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedTilt {
    samples: Vec<Option<Vec3>>,
    cursor: usize,
}

impl ScriptedTilt {
    pub fn new(samples: Vec<Option<Vec3>>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl TiltSensor for ScriptedTilt {
    fn sample(&mut self) -> Option<Vec3> {
        let sample = self.samples.get(self.cursor).copied().flatten();
        self.cursor += 1;
        sample
    }
}

/// A hand wobbling around a resting tilt, with occasional missed reads
#[derive(Debug, Clone)]
pub struct JitterTilt {
    rng: Pcg32,
    rest: Vec3,
    amplitude: f32,
    dropout: f64,
}

impl JitterTilt {
    pub fn new(seed: u64, rest: Vec3, amplitude: f32, dropout: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            rest,
            amplitude,
            dropout: dropout.clamp(0.0, 1.0),
        }
    }
}

impl TiltSensor for JitterTilt {
    fn sample(&mut self) -> Option<Vec3> {
        if self.rng.random_bool(self.dropout) {
            return None;
        }
        if self.amplitude <= 0.0 {
            return Some(self.rest);
        }
        let a = self.amplitude;
        let noise = Vec3::new(
            self.rng.random_range(-a..a),
            self.rng.random_range(-a..a),
            0.0,
        );
        Some(self.rest + noise)
    }
}
