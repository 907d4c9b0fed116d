//! Tick orchestrator, the robot's per-tick entry point.
//!
//! `RobotController` owns the gun stabilizer, radar sweep controller, fire
//! gate and navigator, and runs them in a fixed order every tick. It is a
//! deterministic function of its config, the navigator seed and the snapshot
//! sequence. A tick never blocks and never fails.

use serde::Serialize;

use gunner_core::angles::fold;
use gunner_core::commands::RobotCommand;
use gunner_core::config::{ConfigError, ControllerConfig};
use gunner_core::enums::{EventKind, SweepCase};
use gunner_core::state::TickSnapshot;
use gunner_nav::cruise;
use gunner_nav::{ChassisNavigator, Navigator};

use crate::fire::{FireDecision, FireGate};
use crate::gun::{GunAlignment, GunStabilizer};
use crate::radar::RadarSweepController;

/// Line shown when the robot takes a hit.
pub const HIT_REACTION: &str = "Ow! You'll pay for that!";

/// Everything the controller decided in one tick, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub time: u64,
    pub case: SweepCase,
    pub locked: bool,
    pub heading_change: f64,
    pub target_distance: Option<f64>,
    pub fire: FireDecision,
    pub gun: GunAlignment,
    pub radar_turn: f64,
}

/// The robot's targeting-and-tracking controller.
pub struct RobotController<N = ChassisNavigator> {
    config: ControllerConfig,
    navigator: N,
    gun: GunStabilizer,
    radar: RadarSweepController,
    fire_gate: FireGate,
    last_report: Option<TickReport>,
}

impl RobotController<ChassisNavigator> {
    /// Controller with the default edge-avoiding, zig-zagging navigator,
    /// seeded from `config.nav.seed`.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let navigator = ChassisNavigator::new(&config.nav);
        Self::with_navigator(config, navigator)
    }
}

impl<N: Navigator> RobotController<N> {
    /// Controller driven by a caller-supplied navigator.
    pub fn with_navigator(config: ControllerConfig, navigator: N) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gun: GunStabilizer::new(),
            radar: RadarSweepController::from_config(&config),
            fire_gate: FireGate::from_config(&config),
            navigator,
            config,
            last_report: None,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn gun(&self) -> &GunStabilizer {
        &self.gun
    }

    pub fn radar(&self) -> &RadarSweepController {
        &self.radar
    }

    pub fn fire_gate(&self) -> &FireGate {
        &self.fire_gate
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    /// Decide this tick's commands.
    pub fn tick(&mut self, snapshot: &TickSnapshot) -> Vec<RobotCommand> {
        let snapshot = snapshot.normalized();
        let mut commands = Vec::with_capacity(6);

        // 1. Cruise control
        let accel = cruise::to_speed(snapshot.speed, self.config.cruise_speed);
        if accel != 0.0 {
            commands.push(RobotCommand::Accelerate { delta: accel });
        }

        // 2. Chassis navigation
        let mut heading_change = self.navigator.steer(&snapshot);
        if !heading_change.is_finite() {
            log::warn!("navigator returned {heading_change}; holding chassis heading");
            heading_change = 0.0;
        }
        if heading_change != 0.0 {
            commands.push(RobotCommand::Turn {
                degrees: heading_change,
            });
        }

        // 3. Radar state machine, fire gate when locked
        let contact = snapshot.events.nearest_contact();
        self.radar.observe_contact(contact.is_some());
        let sweep = self.radar.advance(snapshot.radar_heading, &mut self.gun);
        if sweep.case == SweepCase::Search {
            self.fire_gate.reset();
        }

        let fire = match (sweep.engage, contact) {
            (Some(arc), Some(target)) => self.fire_gate.fire_on_target_between(
                &mut self.gun,
                snapshot.gun_heading,
                arc.start,
                arc.end,
                target.distance,
            ),
            _ => FireDecision::hold(),
        };
        if fire.should_fire {
            commands.push(RobotCommand::Fire { power: fire.power });
        }

        // 4. Gun alignment against the committed chassis turn
        let gun = self.gun.align_gun(snapshot.gun_heading, heading_change);
        if gun.turn != 0.0 {
            commands.push(RobotCommand::TurnGun { degrees: gun.turn });
        }

        // 5. Radar alignment: sweep step measured against the world, not the gun
        let radar_turn = fold(sweep.radar_step - gun.displacement);
        if radar_turn != 0.0 {
            commands.push(RobotCommand::TurnRadar {
                degrees: radar_turn,
            });
        }

        // 6. Hits and broadcasts
        if let Some(say) = self.process_chatter(&snapshot) {
            commands.push(say);
        }

        self.radar.end_tick();

        let report = TickReport {
            time: snapshot.time,
            case: sweep.case,
            locked: sweep.locked,
            heading_change,
            target_distance: contact.map(|c| c.distance),
            fire,
            gun,
            radar_turn,
        };
        log::trace!(
            "tick {}: {:?} -> [{}]",
            snapshot.time,
            report,
            commands.iter().map(RobotCommand::kind).collect::<Vec<_>>().join(", ")
        );
        self.last_report = Some(report);

        commands
    }

    /// React to hits and log broadcasts.
    fn process_chatter(&self, snapshot: &TickSnapshot) -> Option<RobotCommand> {
        if let Some(broadcasts) = &snapshot.events.broadcasts {
            for broadcast in broadcasts {
                log::info!(
                    "broadcast received: {} ({})",
                    broadcast.message,
                    broadcast.direction.as_deref().unwrap_or("?")
                );
            }
        }

        if snapshot.events.contains(EventKind::GotHit) {
            return Some(RobotCommand::Say {
                message: HIT_REACTION.to_string(),
            });
        }
        None
    }
}
