//! Centralized configuration loading from config.toml.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`TICTACTOE_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command line flags are applied on top by the binary.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! TICTACTOE_<SECTION>_<KEY>=value
//!
//! Examples:
//!     TICTACTOE_COMMON_LOG_LEVEL=debug
//!     TICTACTOE_GAME_BOARD_SIZE=4
//!     TICTACTOE_MCTS_ROLLOUTS=5000
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, read_config, ConfigError, CONFIG_ENV_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
