//! Scenario files: what the controller is run against.
//!
//! A scenario is JSON. It either sets up an [`Arena`](crate::arena::Arena)
//! for a fixed number of ticks or lists recorded snapshots to replay
//! verbatim. Controller tuning travels with the scenario and can be
//! overridden from the command line.

use serde::{Deserialize, Serialize};

use gunner_core::config::ControllerConfig;
use gunner_core::state::TickSnapshot;

use crate::arena::ArenaSetup;

/// Default match length for arena scenarios.
pub const DEFAULT_TICKS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioSource {
    /// Simulate against fixed targets.
    Arena(ArenaSetup),
    /// Feed these snapshots to the controller in order.
    Replay(Vec<TickSnapshot>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default)]
    pub controller: ControllerConfig,
    pub source: ScenarioSource,
}

fn default_ticks() -> u64 {
    DEFAULT_TICKS
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Built-in one-on-one against a single stationary target.
    pub fn duel() -> Self {
        Self {
            name: "duel".to_string(),
            ticks: DEFAULT_TICKS,
            controller: ControllerConfig::default(),
            source: ScenarioSource::Arena(ArenaSetup::duel()),
        }
    }

    /// Number of ticks this scenario will actually run.
    pub fn tick_count(&self) -> u64 {
        match &self.source {
            ScenarioSource::Arena(_) => self.ticks,
            ScenarioSource::Replay(snapshots) => self.ticks.min(snapshots.len() as u64),
        }
    }
}
