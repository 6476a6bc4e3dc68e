//! A single one-way lane of cells with its cars, light signals and generator

use log::debug;
use rand::Rng;

use super::car::SimCar;
use super::error::{CollisionError, SimResult};
use super::generator::CarGenerator;
use super::light_signal::LightSignal;
use super::types::{Direction, NO_OBSTACLE_DISTANCE};

/// What the road's generator did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// The generator is still counting down
    Idle,
    /// A new car entered the road
    Spawned,
    /// A car was due but the entry cell is occupied (traffic jam)
    Blocked,
}

/// Result of advancing one road by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadTickReport {
    pub exited: usize,
    pub spawn: SpawnOutcome,
}

#[derive(Debug, Clone)]
pub struct SimRoad {
    /// Fixed cross-axis coordinate (row for horizontal, column for vertical)
    pub offset: usize,
    pub direction: Direction,
    pub length: usize,
    generator: CarGenerator,
    /// Sorted by position, unique positions
    cars: Vec<SimCar>,
    /// Sorted by position, unique positions
    light_signals: Vec<LightSignal>,
    /// Index into `cars` for every occupied cell, rebuilt every tick
    occupancy: Vec<Option<usize>>,
}

impl SimRoad {
    pub fn new(
        offset: usize,
        direction: Direction,
        length: usize,
        generator: CarGenerator,
    ) -> Self {
        Self {
            offset,
            direction,
            length,
            generator,
            cars: Vec::new(),
            light_signals: Vec::new(),
            occupancy: vec![None; length],
        }
    }

    pub fn cars(&self) -> &[SimCar] {
        &self.cars
    }

    pub fn light_signals(&self) -> &[LightSignal] {
        &self.light_signals
    }

    pub fn generator(&self) -> &CarGenerator {
        &self.generator
    }

    /// Per-cell occupancy as of the end of the last tick
    pub fn occupancy(&self) -> &[Option<usize>] {
        &self.occupancy
    }

    pub fn car_at(&self, position: usize) -> Option<&SimCar> {
        self.occupancy
            .get(position)
            .copied()
            .flatten()
            .and_then(|index| self.cars.get(index))
    }

    pub fn set_generator(&mut self, generator: CarGenerator) {
        self.generator = generator;
    }

    /// Insert a car keeping cars sorted; fails if the cell is taken
    pub fn add_car(&mut self, car: SimCar) -> SimResult<()> {
        match self.cars.binary_search_by_key(&car.position, |c| c.position) {
            Ok(_) => Err(CollisionError::Car {
                position: car.position,
            }
            .into()),
            Err(index) => {
                self.cars.insert(index, car);
                Ok(())
            }
        }
    }

    /// Insert a light signal keeping signals sorted; fails if the cell is taken
    pub fn add_light_signal(&mut self, signal: LightSignal) -> SimResult<()> {
        match self
            .light_signals
            .binary_search_by_key(&signal.position, |s| s.position)
        {
            Ok(_) => Err(CollisionError::LightSignal {
                position: signal.position,
            }
            .into()),
            Err(index) => {
                self.light_signals.insert(index, signal);
                Ok(())
            }
        }
    }

    pub fn clear_cars(&mut self) {
        self.cars.clear();
        self.rebuild_occupancy();
    }

    pub fn clear_light_signals(&mut self) {
        self.light_signals.clear();
    }

    /// Drop every signal sitting 1 or 2 cells after its predecessor so that
    /// adjacent intersections share a single light.
    ///
    /// Each signal is compared against its neighbour in the list as it was
    /// before any removal.
    pub fn dedup_light_signals(&mut self) -> usize {
        let remove: Vec<usize> = (1..self.light_signals.len())
            .rev()
            .filter(|&i| {
                let gap = self.light_signals[i].position - self.light_signals[i - 1].position;
                gap == 1 || gap == 2
            })
            .collect();

        // Descending order, so earlier indices stay valid
        for &index in &remove {
            self.light_signals.remove(index);
        }
        remove.len()
    }

    /// Distance from `position` to the nearest red signal at or ahead of it
    fn distance_to_red_signal(&self, position: usize) -> usize {
        self.light_signals
            .iter()
            .filter(|signal| signal.is_red() && signal.position >= position)
            .map(|signal| signal.position - position)
            .min()
            .unwrap_or(NO_OBSTACLE_DISTANCE)
    }

    /// Advance cars, then signals, then try to spawn a new car.
    ///
    /// A car is never moved onto or past the cell the car ahead held at the
    /// start of the tick, so at most the leading car exits per tick.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> RoadTickReport {
        // Cars ahead have not moved yet when the car behind them is advanced
        for i in 0..self.cars.len() {
            let position = self.cars[i].position;
            let next_position = self
                .cars
                .get(i + 1)
                .map(|next| next.position)
                .filter(|&next| next > position);

            let distance_to_next_car = next_position
                .map(|next| next - position)
                .unwrap_or(NO_OBSTACLE_DISTANCE);
            let distance = distance_to_next_car.min(self.distance_to_red_signal(position));

            let car = &mut self.cars[i];
            car.advance(distance);

            // Never drive into the car ahead
            if let Some(next) = next_position {
                if car.position >= next {
                    car.position = next - 1;
                    car.progress = 0.0;
                }
            }
        }

        let before = self.cars.len();
        let length = self.length;
        self.cars.retain(|car| car.position < length);
        let exited = before - self.cars.len();

        for signal in &mut self.light_signals {
            signal.tick();
        }

        let spawn = match self.generator.tick(rng) {
            None => SpawnOutcome::Idle,
            Some(car) => match self.add_car(car) {
                Ok(()) => SpawnOutcome::Spawned,
                Err(e) => {
                    debug!(
                        "Traffic jam on {} road {}: {}",
                        self.direction, self.offset, e
                    );
                    SpawnOutcome::Blocked
                }
            },
        };

        self.rebuild_occupancy();

        RoadTickReport { exited, spawn }
    }

    fn rebuild_occupancy(&mut self) {
        let mut occupancy = vec![None; self.length];
        for (index, car) in self.cars.iter().enumerate() {
            if let Some(slot) = occupancy.get_mut(car.position) {
                *slot = Some(index);
            }
        }
        self.occupancy = occupancy;
    }
}
