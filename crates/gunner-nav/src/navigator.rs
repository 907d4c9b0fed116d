//! Chassis navigation: the source of each tick's heading change.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gunner_core::config::NavConfig;
use gunner_core::state::TickSnapshot;

use crate::edges;
use crate::zigzag::ZigZag;

/// Anything that can decide the chassis turn for a tick.
///
/// The returned value is the exact turn the controller will issue, so the gun
/// and radar can compensate for it in the same tick.
pub trait Navigator {
    fn steer(&mut self, snapshot: &TickSnapshot) -> f64;
}

impl<F> Navigator for F
where
    F: FnMut(&TickSnapshot) -> f64,
{
    fn steer(&mut self, snapshot: &TickSnapshot) -> f64 {
        self(snapshot)
    }
}

/// Edge avoidance first; zig-zag when no wall is near.
pub struct ChassisNavigator {
    rng: ChaCha8Rng,
    zigzag: ZigZag,
    edge_proximity: f64,
    edge_turn: f64,
}

impl ChassisNavigator {
    /// Create a navigator seeded from `config.seed`.
    pub fn new(config: &NavConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(config.seed))
    }

    /// Create a navigator drawing from an existing RNG.
    pub fn with_rng(config: &NavConfig, mut rng: ChaCha8Rng) -> Self {
        let zigzag = ZigZag::new(
            &mut rng,
            config.zig_turn_speed,
            config.zig_decision_min,
            config.zig_decision_max,
        );
        Self {
            rng,
            zigzag,
            edge_proximity: config.edge_proximity,
            edge_turn: config.edge_turn,
        }
    }

    pub fn zigzag(&self) -> &ZigZag {
        &self.zigzag
    }
}

impl Navigator for ChassisNavigator {
    fn steer(&mut self, snapshot: &TickSnapshot) -> f64 {
        match edges::avoid_edges(snapshot, self.edge_proximity, self.edge_turn) {
            Some(turn) => {
                log::trace!("edge avoidance turn {turn}");
                turn
            }
            None => self.zigzag.step(&mut self.rng),
        }
    }
}
