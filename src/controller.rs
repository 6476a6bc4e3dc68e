//! Orchestration between user commands and the simulation model
//!
//! Translates high level commands (number of roads, average speed) into
//! model operations and drives the tick cadence.

use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::simulation::{
    CarGenerator, Direction, SignalTiming, SimModel, SimRoad, TickReport, ValidationError,
};

/// Smallest grid the controller accepts
pub const MIN_GRID_SIZE: usize = 25;
/// Largest grid the controller accepts
pub const MAX_GRID_SIZE: usize = 75;

pub struct SimController {
    model: SimModel,
    /// Template for generators on newly added roads
    generator: CarGenerator,
    is_running: bool,
    rng: Option<StdRng>,
}

impl SimController {
    pub fn new(size: usize, seed: Option<u64>, timing: SignalTiming) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(ValidationError::InvalidGridSize(size)).with_context(|| {
                format!("grid size must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}")
            });
        }

        let model = match seed {
            Some(seed) => SimModel::new_with_seed(size, seed),
            None => SimModel::new(size),
        }
        .with_signal_timing(timing)
        .context("Invalid light signal timing")?;

        Ok(Self {
            model,
            generator: CarGenerator::default(),
            is_running: false,
            // Offset the seed so road placement and car speeds don't share a stream
            rng: seed.map(|seed| StdRng::seed_from_u64(seed.wrapping_add(1))),
        })
    }

    pub fn model(&self) -> &SimModel {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    fn choose_offset(&mut self, free: &[usize]) -> Option<usize> {
        match &mut self.rng {
            Some(rng) => free.choose(rng).copied(),
            None => free.choose(&mut rand::rng()).copied(),
        }
    }

    /// Replace all roads of `direction` with `count` roads at random offsets
    pub fn set_num_roads(&mut self, count: usize, direction: Direction) -> Result<TickReport> {
        self.model.clear_roads(direction)?;

        for placed in 0..count {
            let free = self.model.free_offsets(direction);
            let Some(offset) = self.choose_offset(&free) else {
                warn!("Only placed {} of {} {} roads", placed, count, direction);
                bail!("No free offset left for another {} road", direction);
            };

            let road = SimRoad::new(offset, direction, self.model.size(), self.generator.clone());
            self.model
                .add_road(road)
                .with_context(|| format!("Failed to add {direction} road at offset {offset}"))?;
        }

        Ok(self.do_tick())
    }

    /// Spread generator speeds a quarter either side of `avg_speed`
    pub fn set_generator_avg_speed(&mut self, avg_speed: u32) -> Result<()> {
        let avg = avg_speed as f32;
        let min_speed = (avg - avg / 4.0) as u32;
        let max_speed = (avg + avg / 4.0) as u32;

        self.generator = self.generator.with_speed(min_speed, max_speed)?;
        self.model
            .update_generators_speed(min_speed, max_speed)
            .context("Failed to update generator speed")?;
        Ok(())
    }

    pub fn set_generator_delay(&mut self, delay: u32) -> Result<()> {
        self.generator = self.generator.with_delay(delay)?;
        self.model
            .update_generators_delay(delay)
            .context("Failed to update generator delay")?;
        Ok(())
    }

    pub fn do_tick(&mut self) -> TickReport {
        self.model.tick()
    }

    pub fn start(&mut self) {
        if self.is_running {
            info!("already running");
            return;
        }
        self.is_running = true;
    }

    pub fn stop(&mut self) {
        if !self.is_running {
            info!("not running");
            return;
        }
        self.is_running = false;
    }

    /// Tick up to `ticks` times, sleeping `tick_delay` in between.
    ///
    /// `on_tick` sees every report and may call [`SimController::stop`] to end
    /// the run early. Returns the number of ticks performed.
    pub fn run<F>(&mut self, ticks: u64, tick_delay: Duration, mut on_tick: F) -> u64
    where
        F: FnMut(&mut Self, &TickReport),
    {
        self.start();

        let mut done = 0;
        while self.is_running && done < ticks {
            let report = self.do_tick();
            done += 1;
            on_tick(self, &report);

            if self.is_running && done < ticks && !tick_delay.is_zero() {
                thread::sleep(tick_delay);
            }
        }

        self.is_running = false;
        done
    }
}
