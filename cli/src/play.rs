//! Interactive game against the engine.
//!
//! The human types a cell index, `hint`, `undo` or `quit` at the prompt. The
//! computer answers each human move with a full-budget search; hints use the
//! reduced hint budget for the human's symbol.

use anyhow::{Context, Result};
use games_tictactoe::{Game, Outcome, Player};
use mcts::{best_move, hint, MctsConfig};
use rand_chacha::ChaCha20Rng;
use std::io::{BufRead, Write};
use tracing::debug;

/// One line of human input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Move(usize),
    Hint,
    Undo,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "h" | "hint" => Input::Hint,
            "u" | "undo" => Input::Undo,
            "q" | "quit" | "exit" => Input::Quit,
            other => match other.parse() {
                Ok(cell) => Input::Move(cell),
                Err(_) => Input::Unknown(line.to_string()),
            },
        }
    }
}

/// Run a game on `input`/`out` until it ends, the human quits or input runs
/// out. Returns the final outcome.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    size: usize,
    human: Player,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Outcome> {
    let mut game = Game::new(size);
    let computer = human.opponent();
    let cells = size * size;

    writeln!(
        out,
        "You are {human}. Enter a cell 0-{} (row * {size} + col), 'hint', 'undo' or 'quit'.",
        cells - 1
    )?;

    let mut line = String::new();
    while !game.is_over() {
        if game.to_move() == computer {
            let result = best_move(game.board(), computer, config, rng);
            let cell = result
                .action
                .context("search returned no move on a board with empty cells")?;
            debug!(cell, win_rate = result.win_rate, "Computer move");
            game.play(cell)?;
            writeln!(out, "Computer ({computer}) plays {cell}")?;
            continue;
        }

        writeln!(out, "\n{}", game.board())?;
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match Input::parse(&line) {
            Input::Move(cell) => {
                if let Err(e) = game.play(cell) {
                    writeln!(out, "{e}")?;
                }
            }
            Input::Hint => {
                let result = hint(game.board(), human, config, rng);
                match result.action {
                    Some(cell) => writeln!(out, "Hint: try cell {cell}")?,
                    None => writeln!(out, "No hint available")?,
                }
            }
            Input::Undo => {
                if game.undo_round() {
                    writeln!(out, "Took back your last move and the reply")?;
                } else {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            Input::Quit => break,
            Input::Unknown(text) => writeln!(out, "Unrecognized input: {text:?}")?,
        }
    }

    let outcome = game.outcome().clone();
    match &outcome {
        Outcome::Won { winner, line } => {
            writeln!(out, "\n{}", game.board())?;
            if *winner == human {
                writeln!(out, "You win! Line: {line:?}")?;
            } else {
                writeln!(out, "Computer wins. Line: {line:?}")?;
            }
        }
        Outcome::Draw => {
            writeln!(out, "\n{}", game.board())?;
            writeln!(out, "Draw.")?;
        }
        Outcome::InProgress => writeln!(out, "Bye.")?,
    }

    Ok(outcome)
}
