//! Randomised zig-zag weave.
//!
//! The chassis turns at a fixed rate in one direction for a random number of
//! ticks, then reverses. Leg lengths come from an injected RNG so a seed
//! reproduces the exact heading sequence.

use rand::Rng;

/// Zig-zag state. Built fully initialized; call [`ZigZag::step`] once per tick.
#[derive(Debug, Clone)]
pub struct ZigZag {
    direction: f64,
    count: u32,
    decision_point: u32,
    decision_min: u32,
    decision_max: u32,
    turn_speed: f64,
}

impl ZigZag {
    pub fn new<R: Rng>(rng: &mut R, turn_speed: f64, decision_min: u32, decision_max: u32) -> Self {
        let decision_max = decision_max.max(decision_min);
        Self {
            direction: 1.0,
            count: 0,
            decision_point: rng.gen_range(decision_min..=decision_max),
            decision_min,
            decision_max,
            turn_speed,
        }
    }

    /// Advance one tick and return the chassis turn to issue.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> f64 {
        self.count += 1;

        if self.count >= self.decision_point {
            self.direction = -self.direction;
            self.count = 0;
            self.decision_point = rng.gen_range(self.decision_min..=self.decision_max);
            log::trace!("zig-zag reversed; next leg {} ticks", self.decision_point);
        }

        self.turn_speed * self.direction
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn decision_point(&self) -> u32 {
        self.decision_point
    }
}
