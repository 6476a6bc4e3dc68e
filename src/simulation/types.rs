//! Core types for the traffic simulation

use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Orientation of a road on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Runs along a grid row, left to right
    Horizontal,
    /// Runs along a grid column, top to bottom
    Vertical,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }

    /// Map a position along a road at `offset` to a (row, column) grid cell
    pub fn to_cell(&self, offset: usize, position: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (offset, position),
            Direction::Vertical => (position, offset),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Direction::Horizontal),
            "vertical" => Ok(Direction::Vertical),
            other => Err(ValidationError::InvalidDirection(other.to_string())),
        }
    }
}

/// State of a light signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Red = 0,
    Green = 1,
}

impl SignalState {
    pub fn toggled(self) -> Self {
        match self {
            SignalState::Red => SignalState::Green,
            SignalState::Green => SignalState::Red,
        }
    }

    pub fn cell_code(self) -> CellCode {
        match self {
            SignalState::Red => CellCode::RedLight,
            SignalState::Green => CellCode::GreenLight,
        }
    }
}

/// Small integer codes written into the output grids.
/// Mapping a code to a colour is up to whoever draws the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellCode {
    Empty = 0,
    Road = 1,
    Car = 2,
    RedLight = 3,
    GreenLight = 4,
    /// Default fill of the border grid
    Outline = 11,
}

impl CellCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Single character used by the text renderer
    pub fn symbol(self) -> char {
        match self {
            CellCode::Empty => '.',
            CellCode::Road => '#',
            CellCode::Car => 'C',
            CellCode::RedLight => 'R',
            CellCode::GreenLight => 'G',
            CellCode::Outline => ' ',
        }
    }
}

/// Cars closer than this to an obstacle start braking
pub const DESIRED_OBSTACLE_DISTANCE: usize = 4;

/// Fraction of max speed gained per accelerating tick (max_speed / divider)
pub const ACCELERATION_DIVIDER: f32 = 3.0;

/// Braking strength that brings a car to a full stop
pub const MAX_DECELERATION_STRENGTH: usize = 4;

/// Softens partial braking; larger values brake less
pub const DECELERATION_SLOWER: usize = 3;

/// Progress units that make up one grid cell
pub const CELL_PROGRESS: f32 = 100.0;

/// Distance reported when nothing lies ahead
pub const NO_OBSTACLE_DISTANCE: usize = 999;
