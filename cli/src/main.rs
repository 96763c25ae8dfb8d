//! tictactoe - NxN tic-tac-toe against a Monte Carlo Tree Search engine
//!
//! Subcommands:
//! 1. `best-move` / `hint`: one search on a given position
//! 2. `self-play`: the engine plays both sides and the results are tallied
//! 3. `play`: interactive game on the terminal

use anyhow::{Context, Result};
use clap::Parser;
use games_tictactoe::Player;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io;
use tracing::info;

mod commands;
mod config;
mod play;

use crate::commands::{run_search, run_self_play, SearchKind};
use crate::config::{Cli, Command};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    init_tracing(&cli.log_level)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mcts_config = cli.mcts_config();
    info!(
        seed,
        rollouts = mcts_config.rollouts,
        exploration = mcts_config.exploration_constant,
        "Engine configured"
    );

    let stdout = io::stdout();
    match cli.command {
        Command::BestMove { position, player } => {
            run_search(
                stdout.lock(),
                SearchKind::Move,
                &position.board,
                player,
                &mcts_config,
                position.json,
                &mut rng,
            )?;
        }
        Command::Hint { position, player } => {
            run_search(
                stdout.lock(),
                SearchKind::Hint,
                &position.board,
                player,
                &mcts_config,
                position.json,
                &mut rng,
            )?;
        }
        Command::SelfPlay { size, games, json } => {
            run_self_play(stdout.lock(), size, games, &mcts_config, json, &mut rng)?;
        }
        Command::Play { size, human } => {
            let human: Player = human.parse().context("invalid --human symbol")?;
            let outcome = play::run(
                io::stdin().lock(),
                stdout.lock(),
                size,
                human,
                &mcts_config,
                &mut rng,
            )?;
            info!(?outcome, "Game finished");
        }
    }

    Ok(())
}
