#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::angles::*;
    use crate::commands::RobotCommand;
    use crate::config::{ConfigError, ControllerConfig};
    use crate::enums::*;
    use crate::events::TickEvents;
    use crate::state::TickSnapshot;
    use crate::types::{Battlefield, Hit, ScanReading};

    // ---- Bearing math ----

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(720.5), 0.5);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(-1e-18), 0.0, "tiny negatives must not yield 360");
        for raw in [-1000.0, -359.9, -0.1, 0.0, 123.4, 359.99, 1e6] {
            let n = normalize(raw);
            assert!((0.0..360.0).contains(&n), "{raw} normalized to {n}");
        }
    }

    #[test]
    fn test_bearing_difference_plain() {
        assert_eq!(bearing_difference(80.0, 90.0), 10.0);
        assert_eq!(bearing_difference(90.0, 80.0), -10.0);
        assert_eq!(bearing_difference(0.0, 180.0), 180.0);
        assert_eq!(bearing_difference(180.0, 0.0), -180.0);
    }

    /// Large differences only ever get +360, so +270 becomes +630.
    #[test]
    fn test_bearing_difference_only_adds_full_circle() {
        assert_eq!(bearing_difference(0.0, 270.0), 630.0);
        assert_eq!(bearing_difference(350.0, 10.0), 20.0);
        assert_eq!(bearing_difference(10.0, 350.0), 700.0);
    }

    #[test]
    fn test_bearing_difference_lands_on_target_when_normalized() {
        let mut a = 0.0;
        while a < 360.0 {
            let mut b = 0.0;
            while b < 360.0 {
                let landed = normalize(a + bearing_difference(a, b));
                assert_abs_diff_eq!(landed, b, epsilon = 1e-9);
                let expected = if (b - a).abs() > 180.0 { b - a + 360.0 } else { b - a };
                assert_abs_diff_eq!(normalize(bearing_difference(a, b)), normalize(expected));
                b += 15.0;
            }
            a += 15.0;
        }
    }

    #[test]
    fn test_bearing_correction_subtracts_carried_rotation() {
        assert_eq!(bearing_correction(80.0, 90.0, 0.0), 10.0);
        assert_eq!(bearing_correction(80.0, 90.0, 10.0), 0.0);
        assert_eq!(bearing_correction(80.0, 90.0, -5.0), 15.0);
    }

    #[test]
    fn test_fold_signed_range() {
        assert_eq!(fold(10.0), 10.0);
        assert_eq!(fold(350.0), -10.0);
        assert_eq!(fold(-290.0), 70.0);
        assert_eq!(fold(180.0), 180.0);
        assert_eq!(fold(540.0), 180.0);
    }

    #[test]
    fn test_angular_distance() {
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_within_arc_wraparound() {
        assert!(within_arc(355.0, 350.0, 10.0));
        assert!(within_arc(5.0, 350.0, 10.0));
        assert!(!within_arc(180.0, 350.0, 10.0));
        assert!(within_arc(350.0, 350.0, 10.0), "start is inclusive");
        assert!(within_arc(10.0, 350.0, 10.0), "end is inclusive");
    }

    #[test]
    fn test_within_arc_plain() {
        assert!(within_arc(200.0, 150.0, 230.0));
        assert!(!within_arc(240.0, 150.0, 230.0));
        assert!(!within_arc(355.0, 10.0, 350.0));
        assert!(within_arc(720.0 + 200.0, 150.0, 230.0), "inputs are normalized");
    }

    // ---- Enums ----

    #[test]
    fn test_sweep_case_classify() {
        assert_eq!(SweepCase::classify(false, false), SweepCase::Search);
        assert_eq!(SweepCase::classify(true, false), SweepCase::Contact);
        assert_eq!(SweepCase::classify(true, true), SweepCase::Contact);
        assert_eq!(SweepCase::classify(false, true), SweepCase::Dropout);
    }

    #[test]
    fn test_sweep_direction() {
        let d = SweepDirection::default();
        assert_eq!(d, SweepDirection::Clockwise);
        assert_eq!(d.sign(), 1.0);
        assert_eq!(d.flipped().sign(), -1.0);
        assert_eq!(d.flipped().flipped(), d);
    }

    // ---- Events ----

    #[test]
    fn test_nearest_contact_picks_minimum_distance() {
        let events = TickEvents::scanned(vec![
            ScanReading::new(500.0, 10.0),
            ScanReading::new(120.0, 200.0),
            ScanReading::new(300.0, 90.0),
        ]);
        let nearest = events.nearest_contact().unwrap();
        assert_eq!(nearest.distance, 120.0);
        assert_eq!(nearest.bearing, 200.0);
    }

    #[test]
    fn test_nearest_contact_absent_and_empty() {
        assert!(TickEvents::default().nearest_contact().is_none());
        assert!(TickEvents::scanned(vec![]).nearest_contact().is_none());
    }

    #[test]
    fn test_nearest_contact_skips_unusable_readings() {
        let events = TickEvents::scanned(vec![
            ScanReading::new(f64::NAN, 10.0),
            ScanReading::new(-5.0, 20.0),
        ]);
        let nearest = events.nearest_contact().unwrap();
        assert_eq!(nearest.distance, 0.0, "negative range clamps to point blank");

        let junk = TickEvents::scanned(vec![ScanReading::new(f64::INFINITY, 0.0)]);
        assert!(junk.nearest_contact().is_none());
    }

    #[test]
    fn test_event_presence() {
        let events = TickEvents {
            got_hit: Some(vec![Hit { damage: 3.0 }]),
            ..Default::default()
        };
        assert!(events.contains(EventKind::GotHit));
        assert!(!events.contains(EventKind::RobotScanned));
        assert!(!events.contains(EventKind::Broadcasts));
        assert!(!events.is_empty());
        assert!(TickEvents::default().is_empty());
    }

    /// Absent events are omitted from the wire shape entirely.
    #[test]
    fn test_snapshot_serde_omits_absent_events() {
        let snapshot = TickSnapshot {
            time: 7,
            gun_heading: 80.0,
            events: TickEvents::scanned(vec![ScanReading::new(400.0, 200.0)]),
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("robot_scanned"));
        assert!(!json.contains("got_hit"));
        let back: TickSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_snapshot_normalized() {
        let snapshot = TickSnapshot {
            chassis_heading: -10.0,
            gun_heading: 370.0,
            radar_heading: 720.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(snapshot.chassis_heading, 350.0);
        assert_eq!(snapshot.gun_heading, 10.0);
        assert_eq!(snapshot.radar_heading, 0.0);
    }

    #[test]
    fn test_snapshot_normalized_replaces_non_finite_headings() {
        let snapshot = TickSnapshot {
            chassis_heading: f64::INFINITY,
            gun_heading: f64::NAN,
            radar_heading: 45.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(snapshot.chassis_heading, 0.0);
        assert_eq!(snapshot.gun_heading, 0.0);
        assert_eq!(snapshot.radar_heading, 45.0);
    }

    #[test]
    fn test_battlefield_clamp() {
        let field = Battlefield::new(800.0, 600.0);
        let p = field.clamp(glam::DVec2::new(-50.0, 700.0), 20.0);
        assert_eq!(p, glam::DVec2::new(20.0, 580.0));
    }

    // ---- Commands ----

    #[test]
    fn test_robot_command_tagged_shape() {
        let json = serde_json::to_string(&RobotCommand::Fire { power: 1.5 }).unwrap();
        assert_eq!(json, r#"{"type":"Fire","power":1.5}"#);
        let back: RobotCommand =
            serde_json::from_str(r#"{"type":"TurnGun","degrees":-3.0}"#).unwrap();
        assert_eq!(back, RobotCommand::TurnGun { degrees: -3.0 });
        assert_eq!(back.kind(), "turn_gun");
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = ControllerConfig::default();
        assert_eq!(config.search_bands, vec![60.0, 50.0, 40.0, 30.0, 20.0, 10.0]);
        assert_eq!(config.lock_threshold, 0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_config_fills_defaults() {
        let config =
            ControllerConfig::from_json(r#"{"lock_threshold": 2, "nav": {"seed": 9}}"#).unwrap();
        assert_eq!(config.lock_threshold, 2);
        assert_eq!(config.nav.seed, 9);
        assert_eq!(config.heat_limit, 3.0);
        assert_eq!(config.nav.zig_decision_max, 20);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_config_rejects_bad_bands() {
        let mut config = ControllerConfig {
            search_bands: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSearchBands));

        config.search_bands = vec![60.0, 60.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BandsNotDescending { index: 1, .. })
        ));

        config.search_bands = vec![60.0, -1.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBand { index: 1, .. })
        ));

        config.search_bands = vec![60.0, 30.0];
        config.lock_threshold = 2;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LockThresholdOutOfRange {
                threshold: 2,
                last: 1
            })
        );
    }

    #[test]
    fn test_config_rejects_bad_power_curve() {
        let config = ControllerConfig {
            decay_range: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "decay_range",
                ..
            })
        ));

        let config = ControllerConfig {
            minimum_power: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MinimumAboveHeatLimit { .. })
        ));
    }

    #[test]
    fn test_config_rejects_empty_zig_range() {
        let mut config = ControllerConfig::default();
        config.nav.zig_decision_min = 30;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "zig-zag decision range 30..=20 is empty");
    }
}
