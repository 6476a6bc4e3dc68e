use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::info;

use traffic_automaton::controller::SimController;
use traffic_automaton::simulation::{Direction, SignalTiming, TickReport};

#[derive(Parser)]
#[command(name = "traffic_automaton")]
#[command(about = "Cellular-automaton traffic simulation on a square grid")]
struct Cli {
    /// Side length of the square grid (25 to 75)
    #[arg(long, default_value = "50")]
    size: usize,

    /// Number of horizontal roads
    #[arg(long, default_value = "1")]
    horizontal_roads: usize,

    /// Number of vertical roads
    #[arg(long, default_value = "1")]
    vertical_roads: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "200")]
    ticks: u64,

    /// Pause between ticks in milliseconds
    #[arg(long, default_value = "50")]
    tick_delay_ms: u64,

    /// Average max speed of spawned cars
    #[arg(long)]
    avg_speed: Option<u32>,

    /// Ticks between car spawns on each road
    #[arg(long)]
    delay: Option<u32>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks a light signal stays red
    #[arg(long, default_value = "50")]
    red_duration: u32,

    /// Ticks a light signal stays green
    #[arg(long, default_value = "30")]
    green_duration: u32,

    /// Print the grid every N ticks (0 disables drawing)
    #[arg(long, default_value = "50")]
    draw_every: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run_headless(&cli)
}

fn run_headless(cli: &Cli) -> Result<()> {
    info!(
        "Running traffic simulation: {}x{} grid, {} ticks",
        cli.size, cli.size, cli.ticks
    );

    let timing = SignalTiming {
        red_duration: cli.red_duration,
        green_duration: cli.green_duration,
        ..SignalTiming::default()
    };
    let mut controller = SimController::new(cli.size, cli.seed, timing)?;

    if let Some(avg_speed) = cli.avg_speed {
        controller.set_generator_avg_speed(avg_speed)?;
    }
    if let Some(delay) = cli.delay {
        controller.set_generator_delay(delay)?;
    }
    controller.set_num_roads(cli.horizontal_roads, Direction::Horizontal)?;
    controller.set_num_roads(cli.vertical_roads, Direction::Vertical)?;

    info!(
        "Intersections: {}",
        controller.model().intersections().len()
    );

    let mut totals = TickReport::default();
    let draw_every = cli.draw_every;
    let ticks = controller.run(
        cli.ticks,
        Duration::from_millis(cli.tick_delay_ms),
        |controller, report| {
            totals.spawned += report.spawned;
            totals.blocked += report.blocked;
            totals.exited += report.exited;
            totals.cars = report.cars;

            if draw_every > 0 && report.tick % draw_every == 0 {
                println!("--- Tick {} ({} cars) ---", report.tick, report.cars);
                print!("{}", controller.model().grid().render_ascii());
                println!();
            }
        },
    );

    info!("Cars spawned: {}", totals.spawned);
    info!("Spawns blocked: {}", totals.blocked);
    info!("Cars exited: {}", totals.exited);
    info!("Cars on road: {}", totals.cars);
    info!("SIMULATION COMPLETE after {} ticks", ticks);
    Ok(())
}
