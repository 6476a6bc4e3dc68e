//! Periodic car spawner placed at the start of each road

use rand::Rng;

use super::car::SimCar;
use super::error::{SimResult, ValidationError};

pub const DEFAULT_GENERATOR_DELAY: u32 = 10;
pub const DEFAULT_MIN_SPEED: u32 = 50;
pub const DEFAULT_MAX_SPEED: u32 = 100;

/// Emits one car every `delay` ticks with a random max speed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarGenerator {
    pub position: usize,
    pub delay: u32,
    pub min_speed: u32,
    pub max_speed: u32,
    /// Ticks since the last spawn
    progress: u32,
}

impl Default for CarGenerator {
    fn default() -> Self {
        Self {
            position: 0,
            delay: DEFAULT_GENERATOR_DELAY,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            progress: 0,
        }
    }
}

impl CarGenerator {
    pub fn new(position: usize, delay: u32, min_speed: u32, max_speed: u32) -> SimResult<Self> {
        if min_speed > max_speed {
            return Err(ValidationError::InvalidSpeedRange {
                min: min_speed,
                max: max_speed,
            }
            .into());
        }

        Ok(Self {
            position,
            delay,
            min_speed,
            max_speed,
            progress: 0,
        })
    }

    /// A fresh generator with new speed bounds and everything else kept
    pub fn with_speed(&self, min_speed: u32, max_speed: u32) -> SimResult<Self> {
        Self::new(self.position, self.delay, min_speed, max_speed)
    }

    /// A fresh generator with a new delay and everything else kept
    pub fn with_delay(&self, delay: u32) -> SimResult<Self> {
        Self::new(self.position, delay, self.min_speed, self.max_speed)
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Count one tick and return a new car once `delay` ticks have passed
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Option<SimCar> {
        self.progress += 1;
        if self.progress < self.delay {
            return None;
        }
        self.progress = 0;

        let max_speed = rng.random_range(self.min_speed..=self.max_speed) as f32;
        Some(SimCar::new(max_speed / 2.0, max_speed, self.position))
    }
}
