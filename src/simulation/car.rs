//! Car movement logic for the traffic simulation

use super::types::{
    ACCELERATION_DIVIDER, CELL_PROGRESS, DECELERATION_SLOWER, DESIRED_OBSTACLE_DISTANCE,
    MAX_DECELERATION_STRENGTH,
};

/// A car travelling along a single road
#[derive(Debug, Clone, PartialEq)]
pub struct SimCar {
    /// Progress units gained per tick (100 units = one cell)
    pub speed: f32,
    pub max_speed: f32,
    /// Cell index along the owning road
    pub position: usize,
    /// Sub-cell accumulator in `0..100`
    pub progress: f32,
}

impl SimCar {
    pub fn new(speed: f32, max_speed: f32, position: usize) -> Self {
        Self {
            speed: speed.max(0.0),
            max_speed,
            position,
            progress: 0.0,
        }
    }

    /// Advance the car one tick given the distance to whatever is ahead of it.
    ///
    /// Cars brake when the obstacle is nearer than [`DESIRED_OBSTACLE_DISTANCE`],
    /// harder the closer it is, and accelerate otherwise.
    pub fn advance(&mut self, distance_to_next_obstacle: usize) {
        if distance_to_next_obstacle < DESIRED_OBSTACLE_DISTANCE {
            let strength = (1 + DESIRED_OBSTACLE_DISTANCE - distance_to_next_obstacle)
                .min(MAX_DECELERATION_STRENGTH);
            self.decelerate(strength);
        } else {
            self.accelerate();
        }

        self.progress += self.speed;
        if self.progress < CELL_PROGRESS {
            return;
        }

        let cells = (self.progress / CELL_PROGRESS).floor();
        self.position += cells as usize;
        self.progress -= cells * CELL_PROGRESS;
    }

    /// Speed up by a third of max speed. The result is not clamped, so a car
    /// just below its max speed overshoots it by up to one increment.
    pub fn accelerate(&mut self) {
        if self.speed < self.max_speed {
            self.speed += self.max_speed / ACCELERATION_DIVIDER;
        }
    }

    /// Slow down; `strength` of exactly [`MAX_DECELERATION_STRENGTH`] stops the car
    pub fn decelerate(&mut self, strength: usize) {
        let minus = if strength == MAX_DECELERATION_STRENGTH {
            self.speed
        } else {
            let divisor = (DECELERATION_SLOWER + MAX_DECELERATION_STRENGTH)
                .saturating_sub(strength)
                .max(1);
            self.speed / divisor as f32
        };

        self.speed = (self.speed - minus).max(0.0);
    }

    pub fn is_stopped(&self) -> bool {
        self.speed <= 0.0
    }
}
