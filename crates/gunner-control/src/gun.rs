//! Gun stabilizer.
//!
//! Holds the bearing the gun should point at and, once per tick, issues the
//! turret rotation that reaches it while cancelling out whatever the chassis
//! turned underneath the gun.

use serde::Serialize;

use gunner_core::angles::{bearing_correction, bearing_difference, normalize};

/// Gun bookkeeping carried across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GunState {
    /// Where the gun should point (world frame).
    pub target_bearing: f64,
    /// Gun heading observed at the start of the latest alignment.
    pub previous_heading: f64,
}

/// Result of one [`GunStabilizer::align_gun`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GunAlignment {
    /// Turret rotation to issue, relative to the chassis.
    pub turn: f64,
    /// Degrees the gun moves in the world frame this tick, in `[0, 360)`.
    pub displacement: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GunStabilizer {
    state: GunState,
}

impl GunStabilizer {
    /// A gun aimed at bearing 0 with no recorded heading.
    pub fn new() -> Self {
        Self {
            state: GunState {
                target_bearing: 0.0,
                previous_heading: 0.0,
            },
        }
    }

    pub fn state(&self) -> GunState {
        self.state
    }

    pub fn target_bearing(&self) -> f64 {
        self.state.target_bearing
    }

    /// Shift the target bearing by `increment` degrees.
    pub fn spin_gun(&mut self, increment: f64) {
        if !increment.is_finite() {
            log::warn!("ignoring non-finite gun spin {increment}");
            return;
        }
        self.state.target_bearing = normalize(self.state.target_bearing + increment);
    }

    /// Retarget the gun onto an absolute bearing.
    pub fn point_at(&mut self, bearing: f64) {
        let delta = bearing_difference(self.state.target_bearing, normalize(bearing));
        self.spin_gun(delta);
    }

    /// Compute this tick's turret rotation.
    ///
    /// `heading_change` is the chassis turn already committed for this tick;
    /// the gun is carried by it, so it is subtracted from the correction.
    /// Call once per tick, after navigation and before the radar command.
    /// Non-finite inputs are treated as 0.
    pub fn align_gun(&mut self, gun_heading: f64, heading_change: f64) -> GunAlignment {
        let gun_heading = if gun_heading.is_finite() {
            normalize(gun_heading)
        } else {
            log::warn!("ignoring non-finite gun heading {gun_heading}; assuming 0");
            0.0
        };
        let heading_change = if heading_change.is_finite() {
            heading_change
        } else {
            0.0
        };
        self.state.previous_heading = gun_heading;

        let turn = bearing_correction(gun_heading, self.state.target_bearing, heading_change);
        let new_heading = normalize(gun_heading + heading_change + turn);
        let displacement = normalize(new_heading - self.state.previous_heading);

        GunAlignment { turn, displacement }
    }
}
