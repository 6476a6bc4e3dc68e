//! Orchestration commands layered on top of the model

use std::time::Duration;

use traffic_automaton::controller::SimController;
use traffic_automaton::simulation::{Direction, SignalTiming};

fn controller(size: usize) -> SimController {
    SimController::new(size, Some(3), SignalTiming::default()).unwrap()
}

fn offsets(controller: &SimController, direction: Direction) -> Vec<usize> {
    controller
        .model()
        .roads()
        .iter()
        .filter(|road| road.direction == direction)
        .map(|road| road.offset)
        .collect()
}

#[test]
fn test_grid_size_is_bounded() {
    assert!(SimController::new(24, None, SignalTiming::default()).is_err());
    assert!(SimController::new(76, None, SignalTiming::default()).is_err());
    assert!(SimController::new(25, None, SignalTiming::default()).is_ok());
    assert!(SimController::new(75, None, SignalTiming::default()).is_ok());
}

#[test]
fn test_bad_signal_timing_is_rejected() {
    let timing = SignalTiming {
        red_duration: 10,
        green_duration: 10,
        red_delay: 0,
    };
    assert!(SimController::new(50, None, timing).is_err());
}

#[test]
fn test_set_num_roads_places_distinct_offsets() {
    let mut controller = controller(50);
    controller.set_num_roads(5, Direction::Horizontal).unwrap();

    let mut placed = offsets(&controller, Direction::Horizontal);
    assert_eq!(placed.len(), 5);
    assert!(placed.iter().all(|&offset| (1..=48).contains(&offset)));
    placed.sort_unstable();
    placed.dedup();
    assert_eq!(placed.len(), 5);

    controller.set_num_roads(2, Direction::Horizontal).unwrap();
    assert_eq!(offsets(&controller, Direction::Horizontal).len(), 2);
}

#[test]
fn test_set_num_roads_builds_intersections() {
    let mut controller = controller(50);
    controller.set_num_roads(2, Direction::Horizontal).unwrap();
    let report = controller.set_num_roads(3, Direction::Vertical).unwrap();

    assert_eq!(report.tick, 2);
    assert_eq!(controller.model().intersections().len(), 6);
}

#[test]
fn test_set_num_roads_fails_when_grid_is_full() {
    let mut controller = controller(25);
    // Only offsets 1..=23 are usable
    controller.set_num_roads(23, Direction::Vertical).unwrap();
    assert!(controller.set_num_roads(24, Direction::Vertical).is_err());
}

#[test]
fn test_avg_speed_spreads_a_quarter_each_way() {
    let mut controller = controller(50);
    controller.set_num_roads(1, Direction::Horizontal).unwrap();

    controller.set_generator_avg_speed(80).unwrap();
    let generator = controller.model().roads()[0].generator();
    assert_eq!((generator.min_speed, generator.max_speed), (60, 100));

    controller.set_generator_avg_speed(10).unwrap();
    let generator = controller.model().roads()[0].generator();
    assert_eq!((generator.min_speed, generator.max_speed), (7, 12));
}

#[test]
fn test_new_roads_use_current_generator_settings() {
    let mut controller = controller(50);
    controller.set_generator_avg_speed(40).unwrap();
    controller.set_generator_delay(4).unwrap();
    controller.set_num_roads(2, Direction::Vertical).unwrap();

    for road in controller.model().roads() {
        assert_eq!(road.generator().delay, 4);
        assert_eq!(road.generator().min_speed, 30);
        assert_eq!(road.generator().max_speed, 50);
    }
}

#[test]
fn test_start_and_stop_are_idempotent() {
    let mut controller = controller(50);
    assert!(!controller.is_running());
    controller.start();
    controller.start();
    assert!(controller.is_running());
    controller.stop();
    controller.stop();
    assert!(!controller.is_running());
}

#[test]
fn test_run_stops_on_request() {
    let mut controller = controller(50);
    controller.set_num_roads(1, Direction::Horizontal).unwrap();

    let ticks = controller.run(100, Duration::ZERO, |controller, report| {
        if report.tick == 6 {
            controller.stop();
        }
    });

    // One tick came from set_num_roads
    assert_eq!(ticks, 5);
    assert_eq!(controller.model().ticks(), 6);
    assert!(!controller.is_running());
}

#[test]
fn test_run_completes_requested_ticks() {
    let mut controller = controller(30);
    controller.set_num_roads(2, Direction::Horizontal).unwrap();
    controller.set_num_roads(2, Direction::Vertical).unwrap();

    let mut seen = 0;
    let ticks = controller.run(50, Duration::ZERO, |_, _| seen += 1);
    assert_eq!(ticks, 50);
    assert_eq!(seen, 50);
    assert!(!controller.is_running());
}
