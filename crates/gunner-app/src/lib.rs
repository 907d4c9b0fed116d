//! Headless host for the gunner controller.
//!
//! Runs a `RobotController` against a kinematic arena or a recorded snapshot
//! stream and reports what it decided each tick.

pub mod arena;
pub mod game_loop;
pub mod scenario;

pub use gunner_control as control;
pub use gunner_core as core;
