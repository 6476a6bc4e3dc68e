//! Simulation model that owns every road and renders the output grids
//!
//! Light signals are never patched incrementally: whenever the road set
//! changes they are thrown away and placed again from scratch.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::error::{SimResult, ValidationError};
use super::generator::CarGenerator;
use super::grid::Grid;
use super::light_signal::{LightSignal, SignalTiming};
use super::road::{SimRoad, SpawnOutcome};
use super::types::{CellCode, Direction, SignalState};

/// Totals for a single model tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub spawned: usize,
    pub blocked: usize,
    pub exited: usize,
    /// Cars on all roads after the tick
    pub cars: usize,
}

pub struct SimModel {
    size: usize,
    roads: Vec<SimRoad>,
    signal_timing: SignalTiming,
    grid: Grid,
    border_grid: Grid,
    ticks: u64,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl SimModel {
    fn new_internal(size: usize, rng: Option<StdRng>) -> Self {
        Self {
            size,
            roads: Vec::new(),
            signal_timing: SignalTiming::default(),
            grid: Grid::filled(size, CellCode::Empty),
            border_grid: Grid::filled(size, CellCode::Outline),
            ticks: 0,
            rng,
        }
    }

    pub fn new(size: usize) -> Self {
        Self::new_internal(size, None)
    }

    /// Create a model whose car generators draw from a seeded RNG
    pub fn new_with_seed(size: usize, seed: u64) -> Self {
        Self::new_internal(size, Some(StdRng::seed_from_u64(seed)))
    }

    /// Use different durations for signals placed from now on
    pub fn with_signal_timing(mut self, timing: SignalTiming) -> SimResult<Self> {
        timing.validate()?;
        self.signal_timing = timing;
        self.calculate_intersection_light_signals()?;
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn roads(&self) -> &[SimRoad] {
        &self.roads
    }

    pub fn road(&self, offset: usize, direction: Direction) -> Option<&SimRoad> {
        self.roads
            .iter()
            .find(|road| road.offset == offset && road.direction == direction)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn border_grid(&self) -> &Grid {
        &self.border_grid
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn signal_timing(&self) -> SignalTiming {
        self.signal_timing
    }

    pub fn car_count(&self) -> usize {
        self.roads.iter().map(|road| road.cars().len()).sum()
    }

    /// Crossing cells `(row, column)` of every horizontal/vertical road pair
    pub fn intersections(&self) -> Vec<(usize, usize)> {
        let verticals: Vec<usize> = self.offsets(Direction::Vertical).collect();
        self.offsets(Direction::Horizontal)
            .flat_map(|row| verticals.iter().map(move |&col| (row, col)))
            .collect()
    }

    fn offsets(&self, direction: Direction) -> impl Iterator<Item = usize> + '_ {
        self.roads
            .iter()
            .filter(move |road| road.direction == direction)
            .map(|road| road.offset)
    }

    /// Offsets in `1..size-1` not yet used by a road in `direction`
    pub fn free_offsets(&self, direction: Direction) -> Vec<usize> {
        (1..self.size.saturating_sub(1))
            .filter(|&offset| self.road(offset, direction).is_none())
            .collect()
    }

    pub fn add_road(&mut self, road: SimRoad) -> SimResult<()> {
        if road.offset >= self.size {
            return Err(ValidationError::OffsetOutOfRange {
                offset: road.offset,
                size: self.size,
            }
            .into());
        }
        if road.offset == 0 || road.offset == self.size - 1 {
            return Err(ValidationError::OffsetOnBorder {
                offset: road.offset,
                size: self.size,
            }
            .into());
        }
        if road.length != self.size {
            return Err(ValidationError::RoadLengthMismatch {
                length: road.length,
                size: self.size,
            }
            .into());
        }
        if self.road(road.offset, road.direction).is_some() {
            return Err(ValidationError::RoadExists {
                offset: road.offset,
                direction: road.direction,
            }
            .into());
        }

        info!("Added {} road at offset {}", road.direction, road.offset);
        self.roads.push(road);
        self.calculate_intersection_light_signals()
    }

    /// Remove all roads running in `direction` and empty the remaining ones
    pub fn clear_roads(&mut self, direction: Direction) -> SimResult<()> {
        let before = self.roads.len();
        self.roads.retain(|road| road.direction != direction);
        for road in &mut self.roads {
            road.clear_cars();
        }

        info!(
            "Cleared {} {} roads",
            before - self.roads.len(),
            direction
        );
        self.calculate_intersection_light_signals()
    }

    /// Same as [`SimModel::clear_roads`] with the direction given by name
    pub fn clear_roads_named(&mut self, direction: &str) -> SimResult<()> {
        let direction: Direction = direction.parse()?;
        self.clear_roads(direction)
    }

    /// Replace every road's signals with a freshly placed pair per intersection.
    ///
    /// The vertical road gets a red signal one cell before the crossing and the
    /// horizontal road a green one, then signals bunched within two cells of
    /// each other are collapsed.
    pub fn calculate_intersection_light_signals(&mut self) -> SimResult<()> {
        for road in &mut self.roads {
            road.clear_light_signals();
        }

        let timing = self.signal_timing;
        let crossings = self.intersections();
        for &(row, col) in &crossings {
            if let Some(vertical) = self.road_mut(col, Direction::Vertical) {
                vertical.add_light_signal(LightSignal::new(row - 1, SignalState::Red, timing)?)?;
            }
            if let Some(horizontal) = self.road_mut(row, Direction::Horizontal) {
                horizontal
                    .add_light_signal(LightSignal::new(col - 1, SignalState::Green, timing)?)?;
            }
        }

        let removed: usize = self
            .roads
            .iter_mut()
            .map(|road| road.dedup_light_signals())
            .sum();

        debug!(
            "Placed light signals for {} intersections, merged {}",
            crossings.len(),
            removed
        );
        Ok(())
    }

    fn road_mut(&mut self, offset: usize, direction: Direction) -> Option<&mut SimRoad> {
        self.roads
            .iter_mut()
            .find(|road| road.offset == offset && road.direction == direction)
    }

    /// Give every road a new generator with the given speed bounds
    pub fn update_generators_speed(&mut self, min_speed: u32, max_speed: u32) -> SimResult<()> {
        if min_speed > max_speed {
            return Err(ValidationError::InvalidSpeedRange {
                min: min_speed,
                max: max_speed,
            }
            .into());
        }
        for road in &mut self.roads {
            let generator = road.generator().with_speed(min_speed, max_speed)?;
            road.set_generator(generator);
        }
        debug!("Generator speed set to {}..={}", min_speed, max_speed);
        Ok(())
    }

    /// Give every road a new generator with the given spawn delay
    pub fn update_generators_delay(&mut self, delay: u32) -> SimResult<()> {
        for road in &mut self.roads {
            let generator: CarGenerator = road.generator().with_delay(delay)?;
            road.set_generator(generator);
        }
        debug!("Generator delay set to {}", delay);
        Ok(())
    }

    /// Advance every road by one tick and redraw both grids from scratch
    pub fn tick(&mut self) -> TickReport {
        let Self {
            size,
            roads,
            grid,
            border_grid,
            rng,
            ticks,
            ..
        } = self;

        *grid = Grid::filled(*size, CellCode::Empty);
        *border_grid = Grid::filled(*size, CellCode::Outline);
        *ticks += 1;

        let mut report = TickReport {
            tick: *ticks,
            ..TickReport::default()
        };

        for road in roads.iter_mut() {
            let road_report = match rng.as_mut() {
                Some(rng) => road.tick(rng),
                None => road.tick(&mut rand::rng()),
            };

            report.exited += road_report.exited;
            match road_report.spawn {
                SpawnOutcome::Spawned => report.spawned += 1,
                SpawnOutcome::Blocked => report.blocked += 1,
                SpawnOutcome::Idle => {}
            }

            render_road(road, grid, border_grid);
        }

        report.cars = roads.iter().map(|road| road.cars().len()).sum();
        report
    }
}

/// Draw a road's signals, cars and empty cells.
///
/// Signals go first and an empty road cell never covers anything already drawn.
fn render_road(road: &SimRoad, grid: &mut Grid, border_grid: &mut Grid) {
    for signal in road.light_signals() {
        let (row, col) = road.direction.to_cell(road.offset, signal.position);
        let code = signal.state().cell_code();
        grid.set(row, col, code);
        border_grid.set(row, col, code);
    }

    for (position, slot) in road.occupancy().iter().enumerate() {
        let (row, col) = road.direction.to_cell(road.offset, position);
        if slot.is_some() {
            grid.set(row, col, CellCode::Car);
        } else if grid.get(row, col) == Some(CellCode::Empty) {
            grid.set(row, col, CellCode::Road);
        }
    }
}
