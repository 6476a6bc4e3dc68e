//! Cellular-automaton traffic simulation
//!
//! A grid traffic engine that can be driven headless from the command line.

pub mod controller;
pub mod simulation;
