//! Kinematic arena host.
//!
//! A deliberately small stand-in for a real battle engine: it applies the
//! controller's commands to one robot, moves it, and reports radar contacts
//! against fixed targets. Shots are resolved instantly along the gun line.
//!
//! Headings use the controller's convention: 0 = east, 90 = north (toward
//! y = 0). Rotation is compounded: the gun rides the chassis and the radar
//! rides the gun.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gunner_core::angles::{angular_distance, normalize, within_arc};
use gunner_core::commands::RobotCommand;
use gunner_core::constants::{FULL_CIRCLE, MAX_SPEED};
use gunner_core::events::TickEvents;
use gunner_core::state::TickSnapshot;
use gunner_core::types::{Battlefield, Broadcast, Hit, ScanReading};

// --- Setup ---

/// Starting pose of the controlled robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSetup {
    pub position: DVec2,
    pub chassis_heading: f64,
    pub gun_heading: f64,
    pub radar_heading: f64,
    pub size: f64,
    pub speed: f64,
}

impl Default for RobotSetup {
    fn default() -> Self {
        Self {
            position: DVec2::new(400.0, 400.0),
            chassis_heading: 0.0,
            gun_heading: 0.0,
            radar_heading: 0.0,
            size: 20.0,
            speed: 0.0,
        }
    }
}

/// A stationary opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: DVec2,
    /// Body radius used when resolving shots.
    #[serde(default = "default_target_radius")]
    pub radius: f64,
}

fn default_target_radius() -> f64 {
    20.0
}

/// Damage the host inflicts on the robot at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledHit {
    pub time: u64,
    pub damage: f64,
}

/// A team message delivered at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledBroadcast {
    pub time: u64,
    #[serde(flatten)]
    pub broadcast: Broadcast,
}

/// Everything needed to build an [`Arena`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSetup {
    pub battlefield: Battlefield,
    pub robot: RobotSetup,
    pub targets: Vec<Target>,
    pub hits: Vec<ScheduledHit>,
    pub broadcasts: Vec<ScheduledBroadcast>,
}

impl ArenaSetup {
    /// Robot in the middle of a default field, one target to the north-east.
    pub fn duel() -> Self {
        Self {
            targets: vec![Target {
                position: DVec2::new(600.0, 200.0),
                radius: default_target_radius(),
            }],
            ..Default::default()
        }
    }
}

// --- Runtime state ---

/// Pose of the controlled robot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RobotBody {
    pub position: DVec2,
    pub chassis_heading: f64,
    pub gun_heading: f64,
    pub radar_heading: f64,
    pub size: f64,
    pub speed: f64,
}

impl From<&RobotSetup> for RobotBody {
    fn from(setup: &RobotSetup) -> Self {
        Self {
            position: setup.position,
            chassis_heading: normalize(setup.chassis_heading),
            gun_heading: normalize(setup.gun_heading),
            radar_heading: normalize(setup.radar_heading),
            size: setup.size,
            speed: setup.speed.clamp(-MAX_SPEED, MAX_SPEED),
        }
    }
}

/// Running tallies for a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ArenaStats {
    pub ticks: u64,
    pub scans: u64,
    pub shots_fired: u64,
    pub shots_on_target: u64,
    pub damage_taken: f64,
}

pub struct Arena {
    battlefield: Battlefield,
    robot: RobotBody,
    targets: Vec<Target>,
    hits: Vec<ScheduledHit>,
    broadcasts: Vec<ScheduledBroadcast>,
    time: u64,
    /// Contacts picked up by the sweep of the previous tick.
    pending_scan: Vec<ScanReading>,
    stats: ArenaStats,
}

impl Arena {
    pub fn new(setup: &ArenaSetup) -> Self {
        let mut robot = RobotBody::from(&setup.robot);
        robot.position = setup.battlefield.clamp(robot.position, robot.size);
        Self {
            battlefield: setup.battlefield,
            robot,
            targets: setup.targets.clone(),
            hits: setup.hits.clone(),
            broadcasts: setup.broadcasts.clone(),
            time: 0,
            pending_scan: Vec::new(),
            stats: ArenaStats::default(),
        }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn robot(&self) -> &RobotBody {
        &self.robot
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// World bearing from the robot to `point`.
    pub fn bearing_to(&self, point: DVec2) -> f64 {
        let delta = point - self.robot.position;
        // y grows downward, so north is -y.
        normalize((-delta.y).atan2(delta.x).to_degrees())
    }

    /// What the robot senses at the start of the current tick.
    pub fn snapshot(&self) -> TickSnapshot {
        let hits: Vec<Hit> = self
            .hits
            .iter()
            .filter(|h| h.time == self.time)
            .map(|h| Hit { damage: h.damage })
            .collect();
        let broadcasts: Vec<Broadcast> = self
            .broadcasts
            .iter()
            .filter(|b| b.time == self.time)
            .map(|b| b.broadcast.clone())
            .collect();

        TickSnapshot {
            time: self.time,
            chassis_heading: self.robot.chassis_heading,
            gun_heading: self.robot.gun_heading,
            radar_heading: self.robot.radar_heading,
            position: self.robot.position,
            size: self.robot.size,
            speed: self.robot.speed,
            battlefield: self.battlefield,
            events: TickEvents {
                robot_scanned: non_empty(self.pending_scan.clone()),
                got_hit: non_empty(hits),
                broadcasts: non_empty(broadcasts),
            },
        }
    }

    /// Apply one tick's commands and advance the clock.
    pub fn apply(&mut self, commands: &[RobotCommand]) {
        // 1. Damage scheduled for the tick that just ran
        self.stats.damage_taken += self
            .hits
            .iter()
            .filter(|h| h.time == self.time)
            .map(|h| h.damage)
            .sum::<f64>();

        // 2. Shots leave along the gun line as it stood when the tick began
        for command in commands {
            if let RobotCommand::Fire { power } = command {
                self.resolve_shot(*power);
            }
        }

        // 3. Rotations, compounded chassis -> gun -> radar
        let mut chassis_turn = 0.0;
        let mut gun_turn = 0.0;
        let mut radar_turn = 0.0;
        for command in commands {
            match command {
                RobotCommand::Turn { degrees } => chassis_turn += degrees,
                RobotCommand::TurnGun { degrees } => gun_turn += degrees,
                RobotCommand::TurnRadar { degrees } => radar_turn += degrees,
                RobotCommand::Accelerate { delta } => {
                    self.robot.speed = (self.robot.speed + delta).clamp(-MAX_SPEED, MAX_SPEED);
                }
                RobotCommand::Fire { .. } | RobotCommand::Say { .. } => {}
            }
        }
        let radar_from = self.robot.radar_heading;
        let radar_rotation = chassis_turn + gun_turn + radar_turn;
        self.robot.chassis_heading = normalize(self.robot.chassis_heading + chassis_turn);
        self.robot.gun_heading = normalize(self.robot.gun_heading + chassis_turn + gun_turn);
        self.robot.radar_heading = normalize(radar_from + radar_rotation);

        // 4. Movement along the new chassis heading
        let heading = self.robot.chassis_heading.to_radians();
        let step = DVec2::new(heading.cos(), -heading.sin()) * self.robot.speed;
        self.robot.position = self
            .battlefield
            .clamp(self.robot.position + step, self.robot.size);

        // 5. Radar sweep, reported next tick
        self.pending_scan = self.sweep(radar_from, radar_rotation);
        self.stats.scans += self.pending_scan.len() as u64;

        self.time += 1;
        self.stats.ticks = self.time;
    }

    /// Targets whose bearing lies on the arc the radar just swept.
    fn sweep(&self, from: f64, rotation: f64) -> Vec<ScanReading> {
        let to = normalize(from + rotation);
        let (start, end) = if rotation >= 0.0 { (from, to) } else { (to, from) };
        let full_turn = rotation.abs() >= FULL_CIRCLE;

        self.targets
            .iter()
            .filter_map(|target| {
                let bearing = self.bearing_to(target.position);
                if full_turn || within_arc(bearing, start, end) {
                    let distance = self.robot.position.distance(target.position);
                    Some(ScanReading::new(distance, bearing))
                } else {
                    None
                }
            })
            .collect()
    }

    fn resolve_shot(&mut self, power: f64) {
        self.stats.shots_fired += 1;
        let on_target = self.targets.iter().any(|target| {
            let distance = self.robot.position.distance(target.position);
            if distance <= target.radius {
                return true;
            }
            let tolerance = (target.radius / distance).atan().to_degrees();
            angular_distance(self.robot.gun_heading, self.bearing_to(target.position)) <= tolerance
        });
        if on_target {
            self.stats.shots_on_target += 1;
        }
        log::debug!(
            "tick {}: shot power {power:.2} along {:.1} {}",
            self.time,
            self.robot.gun_heading,
            if on_target { "hits" } else { "misses" }
        );
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
