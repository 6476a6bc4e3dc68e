//! Standalone traffic simulation engine
//!
//! Roads are one-way lanes on a square grid. Cars follow a simple cellular
//! automaton, every horizontal/vertical crossing gets a pair of light
//! signals, and each tick the model redraws two grids of cell codes.

mod car;
mod error;
mod generator;
mod grid;
mod light_signal;
mod model;
mod road;
mod types;

pub use car::SimCar;
pub use error::{CollisionError, SimError, SimResult, ValidationError};
pub use generator::{CarGenerator, DEFAULT_GENERATOR_DELAY, DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED};
pub use grid::Grid;
pub use light_signal::{LightSignal, SignalTiming};
pub use model::{SimModel, TickReport};
pub use road::{RoadTickReport, SimRoad, SpawnOutcome};
pub use types::{
    CellCode, Direction, SignalState, ACCELERATION_DIVIDER, CELL_PROGRESS, DECELERATION_SLOWER,
    DESIRED_OBSTACLE_DISTANCE, MAX_DECELERATION_STRENGTH, NO_OBSTACLE_DISTANCE,
};
