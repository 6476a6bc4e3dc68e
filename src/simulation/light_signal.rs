//! Two-state traffic light placed in front of an intersection

use super::error::{SimResult, ValidationError};
use super::types::SignalState;

/// Durations shared by every signal the model places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTiming {
    pub red_duration: u32,
    pub green_duration: u32,
    /// Accepted for configuration but not used by the state machine
    pub red_delay: u32,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            red_duration: 50,
            green_duration: 30,
            red_delay: 5,
        }
    }
}

impl SignalTiming {
    pub fn validate(&self) -> SimResult<()> {
        if self.red_duration <= self.green_duration {
            return Err(ValidationError::InvalidSignalDurations {
                red: self.red_duration,
                green: self.green_duration,
            }
            .into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightSignal {
    pub position: usize,
    state: SignalState,
    /// Ticks since the last state change
    progress: u32,
    timing: SignalTiming,
}

impl LightSignal {
    /// Build a signal; one starting red is seeded halfway through the
    /// red/green difference so neighbouring lights don't flip together.
    pub fn new(position: usize, state: SignalState, timing: SignalTiming) -> SimResult<Self> {
        timing.validate()?;

        let progress = match state {
            SignalState::Red => (timing.red_duration - timing.green_duration) / 2,
            SignalState::Green => 0,
        };

        Ok(Self {
            position,
            state,
            progress,
            timing,
        })
    }

    pub fn state(&self) -> SignalState {
        self.state
    }

    pub fn is_red(&self) -> bool {
        self.state == SignalState::Red
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn timing(&self) -> SignalTiming {
        self.timing
    }

    /// Flip once the current phase has lasted its duration, then count the tick
    pub fn tick(&mut self) {
        let duration = match self.state {
            SignalState::Red => self.timing.red_duration,
            SignalState::Green => self.timing.green_duration,
        };

        if self.progress >= duration {
            self.state = self.state.toggled();
            self.progress = 0;
        }
        self.progress += 1;
    }
}
