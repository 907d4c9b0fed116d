//! Targeting and tracking for gunner.
//!
//! Keeps the gun and radar on useful bearings while the chassis turns,
//! runs the radar search/lock state machine, and gates fire to the moments
//! the gun sits inside a locked contact arc. `RobotController` wires the
//! pieces together once per tick.

pub mod controller;
pub mod fire;
pub mod gun;
pub mod radar;

pub use controller::{RobotController, TickReport};
pub use gunner_core as core;
