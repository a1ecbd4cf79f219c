//! Simulated background threat monitor

use rand::Rng;

/// Decides, once per monitor tick, whether a threat was seen
pub trait ThreatProbe: Send {
    fn detect(&mut self) -> bool;
}

/// Reports a threat with a fixed probability per tick
#[derive(Debug, Clone, Copy)]
pub struct RandomProbe {
    probability: f64,
}

impl RandomProbe {
    /// Probability is clamped to `0.0..=1.0`
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl ThreatProbe for RandomProbe {
    fn detect(&mut self) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}
