//! Enumeration types used throughout the controller.

use serde::{Deserialize, Serialize};

/// Direction the radar sweeps in. Clockwise means increasing bearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl SweepDirection {
    /// +1.0 for clockwise, -1.0 for counter-clockwise.
    pub fn sign(self) -> f64 {
        match self {
            SweepDirection::Clockwise => 1.0,
            SweepDirection::CounterClockwise => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SweepDirection::Clockwise => SweepDirection::CounterClockwise,
            SweepDirection::CounterClockwise => SweepDirection::Clockwise,
        }
    }
}

/// Which branch of the sweep state machine a tick falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepCase {
    /// No contact this tick or last tick: widest band, clockwise.
    Search,
    /// Contact this tick: snap or engage, then zone in.
    Contact,
    /// Contact last tick only: repeat the previous sweep step.
    Dropout,
}

impl SweepCase {
    /// Classify a tick from this tick's and last tick's contact flags.
    pub fn classify(contact_this_tick: bool, contact_previous_tick: bool) -> Self {
        match (contact_this_tick, contact_previous_tick) {
            (true, _) => SweepCase::Contact,
            (false, true) => SweepCase::Dropout,
            (false, false) => SweepCase::Search,
        }
    }
}

/// Host event kinds a snapshot may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RobotScanned,
    GotHit,
    Broadcasts,
}
