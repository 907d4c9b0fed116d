//! Per-tick sensor snapshot handed to the controller by the host.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::angles::normalize;
use crate::events::TickEvents;
use crate::types::Battlefield;

/// Everything the robot can sense at the start of one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Tick number since the match started.
    pub time: u64,
    /// Chassis heading in degrees.
    pub chassis_heading: f64,
    /// Gun heading in degrees (world frame).
    pub gun_heading: f64,
    /// Radar heading in degrees (world frame).
    pub radar_heading: f64,
    /// Robot centre.
    pub position: DVec2,
    /// Robot body radius.
    pub size: f64,
    /// Current speed along the chassis heading.
    pub speed: f64,
    pub battlefield: Battlefield,
    #[serde(default)]
    pub events: TickEvents,
}

impl TickSnapshot {
    /// Copy of this snapshot with every heading reduced to `[0, 360)`.
    /// Non-finite headings are replaced by 0.
    ///
    /// Hosts are expected to send normalized headings already; the controller
    /// calls this anyway so nothing downstream ever compares raw values.
    pub fn normalized(&self) -> Self {
        Self {
            chassis_heading: finite_heading("chassis", self.chassis_heading),
            gun_heading: finite_heading("gun", self.gun_heading),
            radar_heading: finite_heading("radar", self.radar_heading),
            ..self.clone()
        }
    }
}

/// Normalized heading, or 0 when the host sent a non-finite value.
fn finite_heading(which: &str, heading: f64) -> f64 {
    if heading.is_finite() {
        normalize(heading)
    } else {
        log::warn!("host reported {which} heading {heading}; using 0");
        0.0
    }
}
