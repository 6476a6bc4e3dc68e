//! Errors raised by the simulation engine

use thiserror::Error;

use super::types::Direction;

/// A command or configuration was rejected before touching any state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("road direction must be horizontal or vertical, got {0:?}")]
    InvalidDirection(String),
    #[error("road offset {offset} lies on the border of a {size}x{size} grid")]
    OffsetOnBorder { offset: usize, size: usize },
    #[error("road offset {offset} is outside a {size}x{size} grid")]
    OffsetOutOfRange { offset: usize, size: usize },
    #[error("road length {length} does not match grid size {size}")]
    RoadLengthMismatch { length: usize, size: usize },
    #[error("a {direction} road already exists at offset {offset}")]
    RoadExists { offset: usize, direction: Direction },
    #[error("red duration {red} must exceed green duration {green}")]
    InvalidSignalDurations { red: u32, green: u32 },
    #[error("min speed {min} must not exceed max speed {max}")]
    InvalidSpeedRange { min: u32, max: u32 },
    #[error("grid size {0} leaves no room for roads")]
    InvalidGridSize(usize),
}

/// Two entities tried to occupy the same cell of a road
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    #[error("a car already occupies position {position}")]
    Car { position: usize },
    #[error("a light signal already occupies position {position}")]
    LightSignal { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Collision(#[from] CollisionError),
}

pub type SimResult<T> = Result<T, SimError>;
