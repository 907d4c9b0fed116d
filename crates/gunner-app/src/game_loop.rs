//! Match loop: drives the controller through a scenario one tick at a time.
//!
//! [`run_match`] is the synchronous core. [`spawn_match`] runs it on its own
//! thread and streams each tick over an `mpsc` channel, optionally paced to
//! wall-clock time so a match can be watched live.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;

use gunner_control::{RobotController, TickReport};
use gunner_core::commands::RobotCommand;
use gunner_core::config::ConfigError;

use crate::arena::{Arena, ArenaStats, RobotBody};
use crate::scenario::{Scenario, ScenarioSource};

/// One line of match output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub report: TickReport,
    pub commands: Vec<RobotCommand>,
    /// Robot pose after the commands were applied. Absent in replays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robot: Option<RobotBody>,
}

/// End-of-match totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub name: String,
    pub ticks: u64,
    pub locked_ticks: u64,
    pub shots_fired: u64,
    pub total_power: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arena: Option<ArenaStats>,
}

impl MatchSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn record(&mut self, record: &TickRecord) {
        self.ticks += 1;
        if record.report.locked {
            self.locked_ticks += 1;
        }
        if record.report.fire.should_fire {
            self.shots_fired += 1;
            self.total_power += record.report.fire.power;
        }
    }
}

/// Messages from a spawned match thread.
#[derive(Debug)]
pub enum MatchEvent {
    Tick(Box<TickRecord>),
    Finished(MatchSummary),
    Failed(ConfigError),
}

/// Run `scenario` to completion, handing every tick to `on_tick`.
///
/// `on_tick` returns `false` to stop the match early.
pub fn run_match<F>(scenario: &Scenario, mut on_tick: F) -> Result<MatchSummary, ConfigError>
where
    F: FnMut(TickRecord) -> bool,
{
    let mut controller = RobotController::new(scenario.controller.clone())?;
    let mut summary = MatchSummary::new(&scenario.name);
    let ticks = scenario.tick_count();

    log::info!("starting match '{}' for {ticks} ticks", scenario.name);

    match &scenario.source {
        ScenarioSource::Arena(setup) => {
            let mut arena = Arena::new(setup);
            for _ in 0..ticks {
                let snapshot = arena.snapshot();
                let commands = controller.tick(&snapshot);
                arena.apply(&commands);
                if !emit(&controller, commands, Some(*arena.robot()), &mut summary, &mut on_tick) {
                    break;
                }
            }
            summary.arena = Some(arena.stats());
        }
        ScenarioSource::Replay(snapshots) => {
            for snapshot in snapshots.iter().take(ticks as usize) {
                let commands = controller.tick(snapshot);
                if !emit(&controller, commands, None, &mut summary, &mut on_tick) {
                    break;
                }
            }
        }
    }

    log::info!(
        "match '{}' done: {} ticks, {} shots",
        summary.name,
        summary.ticks,
        summary.shots_fired
    );
    Ok(summary)
}

fn emit<F>(
    controller: &RobotController,
    commands: Vec<RobotCommand>,
    robot: Option<RobotBody>,
    summary: &mut MatchSummary,
    on_tick: &mut F,
) -> bool
where
    F: FnMut(TickRecord) -> bool,
{
    let Some(report) = controller.last_report().copied() else {
        return true;
    };
    let record = TickRecord {
        report,
        commands,
        robot,
    };
    summary.record(&record);
    on_tick(record)
}

/// Run `scenario` on a background thread.
///
/// With `tick_rate` set, ticks are paced to that many per second; otherwise
/// the match runs flat out. The thread stops early if the receiver is dropped.
pub fn spawn_match(
    scenario: Scenario,
    tick_rate: Option<u32>,
) -> std::io::Result<(mpsc::Receiver<MatchEvent>, JoinHandle<()>)> {
    let (event_tx, event_rx) = mpsc::channel::<MatchEvent>();

    let handle = std::thread::Builder::new()
        .name("gunner-match".into())
        .spawn(move || {
            let mut pacer = tick_rate.map(Pacer::new);
            let result = run_match(&scenario, |record| {
                if let Some(pacer) = pacer.as_mut() {
                    pacer.wait();
                }
                event_tx.send(MatchEvent::Tick(Box::new(record))).is_ok()
            });
            let last = match result {
                Ok(summary) => MatchEvent::Finished(summary),
                Err(err) => MatchEvent::Failed(err),
            };
            let _ = event_tx.send(last);
        })?;

    Ok((event_rx, handle))
}

/// Nominal duration of one tick at `tick_rate` ticks per second.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Wall-clock pacing for live matches.
struct Pacer {
    tick: Duration,
    next_tick_time: Instant,
}

impl Pacer {
    fn new(tick_rate: u32) -> Self {
        Self {
            tick: tick_duration(tick_rate),
            next_tick_time: Instant::now(),
        }
    }

    /// Sleep until the next tick is due.
    fn wait(&mut self) {
        self.next_tick_time += self.tick;
        let now = Instant::now();
        if self.next_tick_time > now {
            std::thread::sleep(self.next_tick_time - now);
        } else if now - self.next_tick_time > self.tick * 2 {
            // Too far behind; reset rather than burst to catch up
            self.next_tick_time = now;
        }
    }
}
