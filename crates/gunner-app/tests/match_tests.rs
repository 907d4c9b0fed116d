//! End-to-end matches through the public API.

use approx::assert_abs_diff_eq;
use glam::DVec2;
use test_log::test;

use gunner_app::arena::{Arena, ArenaSetup, RobotSetup, Target};
use gunner_app::game_loop::{run_match, spawn_match, MatchEvent, TickRecord};
use gunner_app::scenario::{Scenario, ScenarioSource};
use gunner_core::commands::RobotCommand;
use gunner_control::RobotController;
use gunner_core::angles::angular_distance;
use gunner_core::config::{ConfigError, ControllerConfig};
use gunner_core::enums::SweepCase;
use gunner_core::events::TickEvents;
use gunner_core::state::TickSnapshot;
use gunner_core::types::ScanReading;

fn collect(scenario: &Scenario) -> (Vec<TickRecord>, gunner_app::game_loop::MatchSummary) {
    let mut records = Vec::new();
    let summary = run_match(scenario, |record| {
        records.push(record);
        true
    })
    .unwrap();
    (records, summary)
}

#[test]
fn test_duel_acquires_and_fires() {
    let (records, summary) = collect(&Scenario::duel());
    assert_eq!(summary.ticks, 500);
    assert_eq!(records.len(), 500);
    assert!(summary.shots_fired > 0, "never fired at a stationary target");

    let stats = summary.arena.unwrap();
    assert!(stats.scans > 0);
    assert_eq!(stats.shots_fired, summary.shots_fired);
    assert!(stats.shots_on_target <= stats.shots_fired);

    // Fire commands and reports agree tick by tick.
    for record in &records {
        let fired = record
            .commands
            .iter()
            .any(|c| matches!(c, RobotCommand::Fire { .. }));
        assert_eq!(fired, record.report.fire.should_fire);
    }
}

#[test]
fn test_robot_stays_on_field() {
    let (records, _) = collect(&Scenario::duel());
    for record in &records {
        let robot = record.robot.unwrap();
        assert!(robot.position.x >= robot.size && robot.position.x <= 800.0 - robot.size);
        assert!(robot.position.y >= robot.size && robot.position.y <= 800.0 - robot.size);
        assert!((0.0..360.0).contains(&robot.radar_heading));
    }
}

#[test]
fn test_same_seed_same_match() {
    let (a, _) = collect(&Scenario::duel());
    let (b, _) = collect(&Scenario::duel());
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );

    let mut reseeded = Scenario::duel();
    reseeded.controller.nav.seed = 7;
    let (c, _) = collect(&reseeded);
    assert_ne!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&c).unwrap(),
        "a different seed should weave differently"
    );
}

#[test]
fn test_replay_of_scripted_contact() {
    let battle_snapshot = |time: u64, gun: f64, radar: f64| TickSnapshot {
        time,
        gun_heading: gun,
        radar_heading: radar,
        position: DVec2::new(400.0, 400.0),
        size: 20.0,
        speed: 8.0,
        events: TickEvents::scanned(vec![ScanReading::new(400.0, 200.0)]),
        ..Default::default()
    };
    let scenario = Scenario {
        name: "scripted".to_string(),
        ticks: 100,
        controller: ControllerConfig::default(),
        source: ScenarioSource::Replay(vec![
            battle_snapshot(0, 200.0, 230.0),
            battle_snapshot(1, 201.0, 180.0),
            battle_snapshot(2, 202.0, 220.0),
        ]),
    };

    let (records, summary) = collect(&scenario);
    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.shots_fired, 3);
    assert!(summary.arena.is_none());
    for record in &records {
        assert!(record.robot.is_none());
        assert_abs_diff_eq!(record.report.fire.power, 1.2857, epsilon = 1e-4);
    }
}

/// Gun and radar start at 0 with the target at 200. The chassis holds its
/// heading and creeps straight at the target, so the bearing never changes.
#[test]
fn test_gun_converges_on_target_from_cold_start() {
    let bearing = 200f64.to_radians();
    let target = DVec2::new(400.0 + 300.0 * bearing.cos(), 400.0 - 300.0 * bearing.sin());
    let setup = ArenaSetup {
        robot: RobotSetup {
            chassis_heading: 200.0,
            ..Default::default()
        },
        targets: vec![Target {
            position: target,
            radius: 20.0,
        }],
        ..Default::default()
    };
    let config = ControllerConfig {
        cruise_speed: 1.0,
        ..Default::default()
    };
    let mut arena = Arena::new(&setup);
    let mut controller = RobotController::with_navigator(config, |_: &TickSnapshot| 0.0).unwrap();
    assert_abs_diff_eq!(arena.bearing_to(target), 200.0, epsilon = 1e-9);

    let mut contacts = 0;
    let mut fired = 0;
    for tick in 0..60 {
        let commands = controller.tick(&arena.snapshot());
        arena.apply(&commands);
        let report = controller.last_report().unwrap();
        if tick >= 30 {
            let gun = arena.robot().gun_heading;
            assert!(
                angular_distance(gun, 200.0) <= 15.0,
                "gun at {gun} on tick {tick}"
            );
            if report.case == SweepCase::Contact {
                contacts += 1;
                if report.fire.should_fire {
                    fired += 1;
                }
            }
        }
    }

    assert!(contacts > 0, "radar never held the target");
    assert!(
        fired * 4 >= contacts * 3,
        "only {fired} of {contacts} locked contact ticks fired"
    );
    assert!(arena.stats().shots_on_target > 0);
}

#[test]
fn test_close_target_gets_full_power() {
    let scenario = Scenario {
        name: "point blank".to_string(),
        ticks: 50,
        controller: ControllerConfig {
            cruise_speed: 1.0,
            ..Default::default()
        },
        source: ScenarioSource::Arena(ArenaSetup {
            robot: RobotSetup {
                speed: 0.0,
                ..Default::default()
            },
            targets: vec![Target {
                position: DVec2::new(460.0, 400.0),
                radius: 20.0,
            }],
            ..Default::default()
        }),
    };
    let (records, _) = collect(&scenario);
    let best = records
        .iter()
        .filter(|r| r.report.fire.should_fire)
        .map(|r| r.report.fire.power)
        .fold(0.0, f64::max);
    assert!(best > 2.0, "close shots should be near the heat limit, got {best}");
}

#[test]
fn test_invalid_config_fails_match() {
    let mut scenario = Scenario::duel();
    scenario.controller.decay_range = 0.0;
    let result = run_match(&scenario, |_| true);
    assert!(matches!(result, Err(ConfigError::NotPositive { .. })));
}

#[test]
fn test_early_stop() {
    let mut seen = 0;
    let summary = run_match(&Scenario::duel(), |_| {
        seen += 1;
        seen < 10
    })
    .unwrap();
    assert_eq!(summary.ticks, 10);
}

#[test]
fn test_spawned_match_streams_ticks_then_summary() {
    let mut scenario = Scenario::duel();
    scenario.ticks = 25;
    let (events, handle) = spawn_match(scenario, None).unwrap();

    let mut ticks = 0;
    let mut finished = None;
    for event in events {
        match event {
            MatchEvent::Tick(_) => ticks += 1,
            MatchEvent::Finished(summary) => finished = Some(summary),
            MatchEvent::Failed(err) => panic!("match failed: {err}"),
        }
    }
    handle.join().unwrap();

    assert_eq!(ticks, 25);
    assert_eq!(finished.unwrap().ticks, 25);
}

#[test]
fn test_bundled_scenario_runs() {
    let scenario = Scenario::from_json(include_str!("../scenarios/crossfire.json")).unwrap();
    assert_eq!(scenario.controller.nav.seed, 2024);
    scenario.controller.validate().unwrap();

    let (records, summary) = collect(&scenario);
    assert_eq!(summary.ticks, 800);
    let said = records
        .iter()
        .filter(|r| r.commands.iter().any(|c| matches!(c, RobotCommand::Say { .. })))
        .count();
    assert_eq!(said, 2, "one reaction per scheduled hit");
    assert_eq!(summary.arena.unwrap().damage_taken, 6.5);
}
