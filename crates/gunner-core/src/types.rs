//! Fundamental geometric and sensor types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Arena dimensions. The origin is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    pub width: f64,
    pub height: f64,
}

impl Default for Battlefield {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

impl Battlefield {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a robot centre so its body of radius `size` stays inside.
    pub fn clamp(&self, position: DVec2, size: f64) -> DVec2 {
        DVec2::new(
            position.x.clamp(size, (self.width - size).max(size)),
            position.y.clamp(size, (self.height - size).max(size)),
        )
    }
}

/// One radar return: range to the opponent and the world bearing it was seen at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanReading {
    pub distance: f64,
    pub bearing: f64,
}

impl ScanReading {
    pub fn new(distance: f64, bearing: f64) -> Self {
        Self { distance, bearing }
    }
}

/// Damage taken this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub damage: f64,
}

/// A team message received this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    pub message: String,
    /// Rough compass direction of the sender, as reported by the host.
    #[serde(default)]
    pub direction: Option<String>,
}
