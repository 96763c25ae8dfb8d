//! Tests for the configuration module.
//!
//! Tests touching the process environment each use their own variables so
//! they can run in parallel.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.game.board_size, 3);
    assert_eq!(config.game.human_player, "X");
    assert_eq!(config.mcts.rollouts, 2000);
    assert!((config.mcts.exploration_constant - 1.414).abs() < f64::EPSILON);
    assert_eq!(config.mcts.hint_rollout_cap, 500);
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[game]
board_size = 5
human_player = "O"

[mcts]
rollouts = 10000
exploration_constant = 0.9
hint_rollout_cap = 1000
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.game.board_size, 5);
    assert_eq!(config.game.human_player, "O");
    assert_eq!(config.mcts.rollouts, 10000);
    assert!((config.mcts.exploration_constant - 0.9).abs() < f64::EPSILON);
    assert_eq!(config.mcts.hint_rollout_cap, 1000);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
rollouts = 50
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.mcts.rollouts, 50);
    assert_eq!(config.mcts.hint_rollout_cap, 500); // Default
    assert_eq!(config.game.board_size, 3); // Default
    assert_eq!(config.common.log_level, "info"); // Default
}

#[test]
fn test_env_overrides() {
    std::env::set_var("TICTACTOE_GAME_BOARD_SIZE", "5");
    std::env::set_var("TICTACTOE_MCTS_EXPLORATION_CONSTANT", "0.7");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.game.board_size, 5);
    assert!((config.mcts.exploration_constant - 0.7).abs() < f64::EPSILON);

    std::env::remove_var("TICTACTOE_GAME_BOARD_SIZE");
    std::env::remove_var("TICTACTOE_MCTS_EXPLORATION_CONSTANT");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("TICTACTOE_MCTS_HINT_ROLLOUT_CAP", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.hint_rollout_cap, 500);

    std::env::remove_var("TICTACTOE_MCTS_HINT_ROLLOUT_CAP");
}

#[test]
fn test_load_from_path() {
    let file = write_config(
        r#"
[game]
human_player = "O"

[mcts]
rollouts = 123
"#,
    );

    let config = load_from_path(file.path());
    assert_eq!(config.game.human_player, "O");
    assert_eq!(config.mcts.rollouts, 123);
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let file = write_config("[mcts\nrollouts = ");

    let config = load_from_path(file.path());
    assert_eq!(config.mcts.rollouts, 2000);
    assert_eq!(config.game.human_player, "X");
}

#[test]
fn test_read_config_reports_errors() {
    let file = write_config("[mcts\nrollouts = ");
    let err = read_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("failed to parse"));

    let dir = tempfile::tempdir().unwrap();
    let err = read_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_read_config_fills_missing_sections() {
    let file = write_config("[game]\nboard_size = 6\n");

    let config = read_config(file.path()).unwrap();
    assert_eq!(config.game.board_size, 6);
    assert_eq!(config.game.human_player, "X");
    assert_eq!(config.mcts.rollouts, 2000);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config.mcts.rollouts, 2000);
}

#[test]
fn test_load_config_from_env_path() {
    let file = write_config(
        r#"
[common]
log_level = "trace"
"#,
    );
    std::env::set_var(CONFIG_ENV_VAR, file.path());

    let config = load_config();
    assert_eq!(config.common.log_level, "trace");

    std::env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.game.board_size, cloned.game.board_size);
    assert_eq!(config.mcts.rollouts, cloned.mcts.rollouts);
}
