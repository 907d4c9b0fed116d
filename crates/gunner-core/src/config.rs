//! Controller configuration.
//!
//! Defaults come from [`crate::constants`]. Configs loaded from JSON may omit
//! any field. Always call [`ControllerConfig::validate`] before use;
//! the controller constructor does this for you.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Reasons a configuration cannot drive the controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("search band table is empty")]
    NoSearchBands,
    #[error("search band {index} is {value}; bands must be finite and positive")]
    InvalidBand { index: usize, value: f64 },
    #[error("search band {index} ({value}) is not narrower than the band before it")]
    BandsNotDescending { index: usize, value: f64 },
    #[error("lock threshold {threshold} is beyond the last band index {last}")]
    LockThresholdOutOfRange { threshold: usize, last: usize },
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("minimum power {minimum} exceeds heat limit {heat_limit}")]
    MinimumAboveHeatLimit { minimum: f64, heat_limit: f64 },
    #[error("zig-zag decision range {min}..={max} is empty")]
    EmptyZigRange { min: u32, max: u32 },
}

/// Navigator tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// RNG seed for the zig-zag timing. Same seed = same heading sequence.
    pub seed: u64,
    pub edge_proximity: f64,
    pub edge_turn: f64,
    pub zig_turn_speed: f64,
    pub zig_decision_min: u32,
    pub zig_decision_max: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            edge_proximity: NEAR_EDGE_PROXIMITY,
            edge_turn: EDGE_TURN,
            zig_turn_speed: ZIG_TURN_SPEED,
            zig_decision_min: ZIG_DECISION_MIN,
            zig_decision_max: ZIG_DECISION_MAX,
        }
    }
}

/// Full controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Radar sweep amplitudes in degrees, widest first.
    pub search_bands: Vec<f64>,
    /// Band index from which the radar counts as locked.
    pub lock_threshold: usize,
    pub heat_limit: f64,
    pub decay_range: f64,
    pub minimum_power: f64,
    /// Degrees the gun moves per tick while sweeping a locked arc.
    pub gun_nudge: f64,
    pub cruise_speed: f64,
    pub nav: NavConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            search_bands: SEARCH_BANDS.to_vec(),
            lock_threshold: LOCK_THRESHOLD,
            heat_limit: HEAT_LIMIT,
            decay_range: DECAY_RANGE,
            minimum_power: MINIMUM_POWER,
            gun_nudge: GUN_NUDGE,
            cruise_speed: MAX_SPEED,
            nav: NavConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every invariant the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_bands.is_empty() {
            return Err(ConfigError::NoSearchBands);
        }
        for (index, &value) in self.search_bands.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidBand { index, value });
            }
            if index > 0 && value >= self.search_bands[index - 1] {
                return Err(ConfigError::BandsNotDescending { index, value });
            }
        }

        let last = self.search_bands.len() - 1;
        if self.lock_threshold > last {
            return Err(ConfigError::LockThresholdOutOfRange {
                threshold: self.lock_threshold,
                last,
            });
        }

        positive("heat_limit", self.heat_limit)?;
        positive("decay_range", self.decay_range)?;
        positive("minimum_power", self.minimum_power)?;
        positive("gun_nudge", self.gun_nudge)?;
        positive("cruise_speed", self.cruise_speed)?;
        if self.minimum_power > self.heat_limit {
            return Err(ConfigError::MinimumAboveHeatLimit {
                minimum: self.minimum_power,
                heat_limit: self.heat_limit,
            });
        }

        positive("nav.edge_proximity", self.nav.edge_proximity)?;
        positive("nav.edge_turn", self.nav.edge_turn)?;
        positive("nav.zig_turn_speed", self.nav.zig_turn_speed)?;
        if self.nav.zig_decision_min == 0 || self.nav.zig_decision_min > self.nav.zig_decision_max {
            return Err(ConfigError::EmptyZigRange {
                min: self.nav.zig_decision_min,
                max: self.nav.zig_decision_max,
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
