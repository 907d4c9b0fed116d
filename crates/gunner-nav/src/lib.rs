//! Chassis navigation for gunner.
//!
//! Edge avoidance, a seeded zig-zag weave and cruise control. The controller
//! only consumes the heading change these produce; nothing here knows about
//! the gun or radar.

pub mod cruise;
pub mod edges;
pub mod navigator;
pub mod zigzag;

pub use gunner_core as core;
pub use navigator::{ChassisNavigator, Navigator};
