//! Commands the controller issues to the host.
//!
//! One tick produces at most one command of each kind.

use serde::{Deserialize, Serialize};

/// All possible robot actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RobotCommand {
    // --- Rotation (degrees, positive = increasing bearing) ---
    /// Rotate the chassis. Gun and radar ride along.
    Turn { degrees: f64 },
    /// Rotate the gun relative to the chassis. The radar rides along.
    TurnGun { degrees: f64 },
    /// Rotate the radar relative to the gun.
    TurnRadar { degrees: f64 },

    // --- Chassis ---
    /// Change speed by the given amount.
    Accelerate { delta: f64 },

    // --- Weapons / chatter ---
    /// Fire the gun at the given power.
    Fire { power: f64 },
    /// Show a text message above the robot.
    Say { message: String },
}

impl RobotCommand {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RobotCommand::Turn { .. } => "turn",
            RobotCommand::TurnGun { .. } => "turn_gun",
            RobotCommand::TurnRadar { .. } => "turn_radar",
            RobotCommand::Accelerate { .. } => "accelerate",
            RobotCommand::Fire { .. } => "fire",
            RobotCommand::Say { .. } => "say",
        }
    }
}
