//! Fire gate. Decides whether to shoot at a locked contact and at what power.
//!
//! The gun only fires while its heading sits inside the arc the radar swept
//! when it saw the target. While inside, the gun is walked back and forth
//! across the arc one nudge per tick. Outside, the gun is pointed at the
//! nearer arc boundary and holds fire.

use serde::Serialize;

use gunner_core::angles::{normalize, within_arc};
use gunner_core::config::ControllerConfig;
use gunner_core::enums::SweepDirection;

use crate::gun::GunStabilizer;
use crate::radar::ContactArc;

/// Outcome of one fire-gate evaluation. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FireDecision {
    pub should_fire: bool,
    pub power: f64,
}

impl FireDecision {
    pub fn hold() -> Self {
        Self {
            should_fire: false,
            power: 0.0,
        }
    }

    pub fn fire(power: f64) -> Self {
        Self {
            should_fire: true,
            power,
        }
    }
}

/// Heat-limited shot power as a function of target distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurve {
    pub heat_limit: f64,
    /// Always positive; checked by `ControllerConfig::validate`.
    pub decay_range: f64,
    pub minimum_power: f64,
}

impl PowerCurve {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            heat_limit: config.heat_limit,
            decay_range: config.decay_range,
            minimum_power: config.minimum_power,
        }
    }

    /// Full heat at point blank, decaying linearly to the floor at
    /// `decay_range`; the floor beyond.
    pub fn power(&self, distance: f64) -> f64 {
        if !distance.is_finite() || distance > self.decay_range {
            return self.minimum_power;
        }
        let distance = distance.max(0.0);
        let decayed = self.heat_limit - distance * (self.heat_limit / self.decay_range);
        decayed.max(self.minimum_power)
    }
}

#[derive(Debug, Clone)]
pub struct FireGate {
    curve: PowerCurve,
    nudge: f64,
    /// Which way the gun is currently walking across the arc.
    sweep: SweepDirection,
}

impl FireGate {
    pub fn new(curve: PowerCurve, nudge: f64) -> Self {
        Self {
            curve,
            nudge,
            sweep: SweepDirection::Clockwise,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(PowerCurve::from_config(config), config.gun_nudge)
    }

    pub fn curve(&self) -> &PowerCurve {
        &self.curve
    }

    pub fn sweep_direction(&self) -> SweepDirection {
        self.sweep
    }

    /// Forget the ping-pong direction so the next lock starts clockwise.
    pub fn reset(&mut self) {
        self.sweep = SweepDirection::Clockwise;
    }

    /// Evaluate one locked contact.
    ///
    /// `range_start..range_end` is the clockwise arc the radar swept (it may
    /// cross 0°). `gun_heading` is the gun's observed heading this tick.
    pub fn fire_on_target_between(
        &mut self,
        gun: &mut GunStabilizer,
        gun_heading: f64,
        range_start: f64,
        range_end: f64,
        distance: f64,
    ) -> FireDecision {
        let gun_heading = normalize(gun_heading);
        let arc = ContactArc {
            start: normalize(range_start),
            end: normalize(range_end),
        };

        if !within_arc(gun_heading, arc.start, arc.end) {
            let boundary = arc.closer_boundary(gun_heading);
            log::debug!(
                "gun {gun_heading:.1} outside arc {:.1}..{:.1}; steering to {boundary:.1}",
                arc.start,
                arc.end
            );
            gun.point_at(boundary);
            return FireDecision::hold();
        }

        // Ping-pong: turn around once the far end is less than a nudge away.
        let remaining = match self.sweep {
            SweepDirection::Clockwise => normalize(arc.end - gun_heading),
            SweepDirection::CounterClockwise => normalize(gun_heading - arc.start),
        };
        if remaining < self.nudge {
            self.sweep = self.sweep.flipped();
        }
        gun.point_at(gun_heading + self.nudge * self.sweep.sign());

        FireDecision::fire(self.curve.power(distance))
    }
}
