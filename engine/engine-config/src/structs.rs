//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_board_size() -> usize {
    defaults::board_size()
}
fn d_human_player() -> String {
    defaults::human_player().into()
}
fn d_rollouts() -> u32 {
    defaults::rollouts()
}
fn d_exploration() -> f64 {
    defaults::exploration_constant()
}
fn d_hint_cap() -> u32 {
    defaults::hint_rollout_cap()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Settings shared by every command
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Offline game settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_board_size")]
    pub board_size: usize,
    /// Symbol the human plays in interactive mode ("X" or "O")
    #[serde(default = "d_human_player")]
    pub human_player: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: defaults::board_size(),
            human_player: defaults::human_player().into(),
        }
    }
}

/// MCTS search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_rollouts")]
    pub rollouts: u32,
    #[serde(default = "d_exploration")]
    pub exploration_constant: f64,
    #[serde(default = "d_hint_cap")]
    pub hint_rollout_cap: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            rollouts: defaults::rollouts(),
            exploration_constant: defaults::exploration_constant(),
            hint_rollout_cap: defaults::hint_rollout_cap(),
        }
    }
}
