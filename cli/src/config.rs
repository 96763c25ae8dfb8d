//! Command line configuration for the `tictactoe` binary.
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use engine_config::{load_config, CentralConfig};
use games_tictactoe::{Board, Player};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_rollouts() -> u32 {
    CENTRAL_CONFIG.mcts.rollouts
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_hint_cap() -> u32 {
    CENTRAL_CONFIG.mcts.hint_rollout_cap
}

fn default_board_size() -> usize {
    CENTRAL_CONFIG.game.board_size
}

fn default_human() -> String {
    CENTRAL_CONFIG.game.human_player.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tictactoe")]
#[command(about = "NxN tic-tac-toe with a Monte Carlo Tree Search opponent")]
#[command(
    long_about = "Pick moves with random-rollout MCTS, watch the engine play itself,
or play against it on the terminal.

Configuration is loaded from config.toml with TICTACTOE_* environment variable
overrides. CLI arguments take highest priority."
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = default_log_level())]
    pub log_level: String,

    /// Rollouts per computer move
    #[arg(long, global = true, default_value_t = default_rollouts())]
    pub rollouts: u32,

    /// UCB1 exploration constant
    #[arg(long, global = true, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Upper bound on the rollouts spent on a hint
    #[arg(long, global = true, default_value_t = default_hint_cap())]
    pub hint_cap: u32,

    /// Seed for the search RNG (random when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the engine's move for a position
    BestMove {
        #[command(flatten)]
        position: PositionArgs,

        /// Symbol to move
        #[arg(long)]
        player: Player,
    },

    /// Print a hint for a position using the reduced hint budget
    Hint {
        #[command(flatten)]
        position: PositionArgs,

        /// Symbol to move
        #[arg(long, default_value = "X")]
        player: Player,
    },

    /// Let the engine play against itself
    SelfPlay {
        /// Rows and columns of the board
        #[arg(long, default_value_t = default_board_size())]
        size: usize,

        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: u32,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play against the engine on stdin/stdout
    Play {
        /// Rows and columns of the board
        #[arg(long, default_value_t = default_board_size())]
        size: usize,

        /// Symbol the human plays (X always moves first)
        #[arg(long, default_value_t = default_human())]
        human: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PositionArgs {
    /// Board text, row by row: X, O and '.' for empty ('/' separates rows)
    #[arg(long)]
    pub board: Board,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        match &self.command {
            Command::SelfPlay { size, .. } | Command::Play { size, .. } => {
                if *size == 0 {
                    return Err(anyhow!("size must be greater than 0"));
                }
                if self.rollouts == 0 {
                    return Err(anyhow!("rollouts must be greater than 0 to play a game"));
                }
            }
            Command::BestMove { .. } | Command::Hint { .. } => {}
        }

        if let Command::Play { human, .. } = &self.command {
            human.parse::<Player>()?;
        }

        Ok(())
    }

    /// Search parameters after CLI overrides.
    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_rollouts(self.rollouts)
            .with_exploration_constant(self.exploration)
            .with_hint_rollout_cap(self.hint_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tictactoe").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_best_move() {
        let cli = parse(&[
            "best-move",
            "--board",
            "XX./OO./...",
            "--player",
            "x",
            "--rollouts",
            "300",
            "--seed",
            "9",
            "--json",
        ]);

        assert_eq!(cli.rollouts, 300);
        assert_eq!(cli.seed, Some(9));
        match cli.command {
            Command::BestMove { position, player } => {
                assert_eq!(player, Player::X);
                assert!(position.json);
                assert_eq!(position.board.legal_moves(), vec![2, 5, 6, 7, 8]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn hint_defaults_to_x() {
        let cli = parse(&["hint", "--board", "........."]);
        match cli.command {
            Command::Hint { player, position } => {
                assert_eq!(player, Player::X);
                assert!(!position.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_board() {
        let args = ["tictactoe", "best-move", "--board", "XX./OO", "--player", "O"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn rejects_unknown_player() {
        let args = ["tictactoe", "best-move", "--board", ".........", "--player", "Z"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn mcts_config_applies_overrides() {
        let cli = parse(&[
            "self-play",
            "--rollouts",
            "40",
            "--exploration",
            "0.5",
            "--hint-cap",
            "10",
        ]);
        let config = cli.mcts_config();
        assert_eq!(config.rollouts, 40);
        assert!((config.exploration_constant - 0.5).abs() < 1e-12);
        assert_eq!(config.hint_rollouts(), 10);
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cli = parse(&["play", "--size", "4", "--human", "o", "--log-level", "debug"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let cli = parse(&["self-play", "--log-level", "nope"]);
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_zero_size() {
        let cli = parse(&["play", "--size", "0"]);
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn validate_rejects_zero_rollouts_for_games() {
        let cli = parse(&["self-play", "--rollouts", "0"]);
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("rollouts"));
    }

    #[test]
    fn validate_accepts_zero_rollouts_for_single_search() {
        let cli = parse(&["best-move", "--board", ".........", "--player", "O", "--rollouts", "0"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_exploration() {
        let cli = parse(&["self-play", "--exploration=-1"]);
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("exploration"));
    }

    #[test]
    fn validate_rejects_unknown_human_symbol() {
        let cli = parse(&["play", "--human", "Q"]);
        assert!(cli.validate().is_err());
    }
}
