use std::io::Write;

use bullet_hell::config::{ConfigError, GameConfig};

#[test]
fn defaults_are_valid() {
    let c = GameConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.frame_budget_ms(), 16);
    assert_eq!(c.spawn_interval_floor_ms, 200);
    assert_eq!(c.score_per_kill, 100);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let c = GameConfig::from_json(r#"{ "score_per_kill": 10, "spawn_interval_floor_ms": 1000 }"#)
        .unwrap();
    assert_eq!(c.score_per_kill, 10);
    assert_eq!(c.spawn_interval_floor_ms, 1000);
    assert_eq!(c.screen_width, 800);
    assert_eq!(c.player_lives, 3);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn floor_above_start_is_rejected() {
    let err = GameConfig::from_json(r#"{ "spawn_interval_floor_ms": 5000 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("spawn_interval_floor_ms"));
}

#[test]
fn oversized_entity_is_rejected() {
    let c = GameConfig {
        enemy_width: 900,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn default_start_matches_session_reset_position() {
    let c = GameConfig::default();
    assert_eq!((c.player_start_x, c.player_start_y), (400, 500));
}

#[test]
fn player_start_outside_field_is_rejected() {
    for (x, y) in [(-1, 500), (751, 500), (400, -1), (400, 551)] {
        let c = GameConfig {
            player_start_x: x,
            player_start_y: y,
            ..GameConfig::default()
        };
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("player start"), "({x}, {y}): {err}");
    }
    let edge = GameConfig {
        player_start_x: 750,
        player_start_y: 550,
        ..GameConfig::default()
    };
    assert!(edge.validate().is_ok());
}

#[test]
fn negative_player_speed_is_rejected() {
    let err = GameConfig::from_json(r#"{ "player_speed": -3 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("player_speed"));
    assert!(GameConfig::from_json(r#"{ "player_speed": 0 }"#).is_ok());
}

#[test]
fn empty_fire_range_is_rejected() {
    let c = GameConfig {
        enemy_fire_interval_min_ms: 3000,
        ..GameConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn upward_enemy_bullets_are_rejected() {
    let c = GameConfig {
        enemy_bullet_speed: -5,
        ..GameConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "target_fps": 30, "player_speed": 8 }}"#).unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.target_fps, 30);
    assert_eq!(c.frame_budget_ms(), 33);
    assert_eq!(c.player_speed, 8);
}

#[test]
fn load_missing_file_is_io_error() {
    let err = GameConfig::load(std::path::Path::new("/nonexistent/bullet_hell.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn config_round_trips_through_json() {
    let c = GameConfig::default();
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(GameConfig::from_json(&json).unwrap(), c);
}
