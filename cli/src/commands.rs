//! One-shot searches and engine-vs-engine games.

use anyhow::{Context, Result};
use games_tictactoe::{Board, Game, Outcome, Player};
use mcts::{best_move, hint, MctsConfig, SearchResult};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// JSON form of a single search.
#[derive(Debug, Serialize)]
struct MoveReport<'a> {
    /// Chosen cell, -1 without a legal move
    cell: i64,
    row: Option<usize>,
    col: Option<usize>,
    #[serde(flatten)]
    result: &'a SearchResult,
}

impl<'a> MoveReport<'a> {
    fn new(board: &Board, result: &'a SearchResult) -> Self {
        let size = board.size();
        Self {
            cell: result.cell_index(),
            row: result.action.map(|cell| cell / size),
            col: result.action.map(|cell| cell % size),
            result,
        }
    }
}

/// Which budget a one-shot search spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Move,
    Hint,
}

/// Run one search and print the chosen cell (or JSON) to `out`.
pub fn run_search<W: Write>(
    mut out: W,
    kind: SearchKind,
    board: &Board,
    player: Player,
    config: &MctsConfig,
    json: bool,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult> {
    let result = match kind {
        SearchKind::Move => best_move(board, player, config, rng),
        SearchKind::Hint => hint(board, player, config, rng),
    };

    if json {
        let report = MoveReport::new(board, &result);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", result.cell_index())?;
    }

    Ok(result)
}

/// A finished engine-vs-engine game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub moves: Vec<usize>,
    pub outcome: Outcome,
}

/// Results over a batch of self-play games.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub games: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Won {
                winner: Player::X, ..
            } => self.x_wins += 1,
            Outcome::Won {
                winner: Player::O, ..
            } => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => return,
        }
        self.games += 1;
    }
}

/// Play one game where both sides use a full-budget search.
pub fn play_self_game(
    size: usize,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<GameRecord> {
    let mut game = Game::new(size);

    while !game.is_over() {
        let player = game.to_move();
        let result = best_move(game.board(), player, config, rng);
        let cell = result
            .action
            .context("search returned no move on a board with empty cells")?;
        debug!(%player, cell, win_rate = result.win_rate, "Engine move");
        game.play(cell)?;
    }

    Ok(GameRecord {
        moves: game.history().to_vec(),
        outcome: game.outcome().clone(),
    })
}

/// Play `games` self-play games, logging each one, and print the tally.
pub fn run_self_play<W: Write>(
    mut out: W,
    size: usize,
    games: u32,
    config: &MctsConfig,
    json: bool,
    rng: &mut ChaCha20Rng,
) -> Result<Tally> {
    let mut tally = Tally::default();

    for game_no in 1..=games {
        let record = play_self_game(size, config, rng)?;
        info!(
            game = game_no,
            moves = ?record.moves,
            outcome = ?record.outcome,
            "Self-play game finished"
        );
        tally.record(&record.outcome);
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&tally)?)?;
    } else {
        writeln!(
            out,
            "games: {}  X wins: {}  O wins: {}  draws: {}",
            tally.games, tally.x_wins, tally.o_wins, tally.draws
        )?;
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn prints_cell_index() {
        let board: Board = "XX. / OO. / ...".parse().unwrap();
        let config = MctsConfig::for_testing();
        let mut out = Vec::new();

        let result =
            run_search(&mut out, SearchKind::Move, &board, Player::X, &config, false, &mut rng(1))
                .unwrap();

        assert_eq!(result.action, Some(2));
        assert_eq!(String::from_utf8(out).unwrap(), "2\n");
    }

    #[test]
    fn prints_sentinel_for_full_board() {
        let board: Board = "XOX/OXO/OXO".parse().unwrap();
        let mut out = Vec::new();

        run_search(
            &mut out,
            SearchKind::Move,
            &board,
            Player::O,
            &MctsConfig::for_testing(),
            false,
            &mut rng(2),
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "-1\n");
    }

    #[test]
    fn json_report_includes_row_and_col() {
        let board: Board = "XX. / OO. / ...".parse().unwrap();
        let mut out = Vec::new();

        run_search(
            &mut out,
            SearchKind::Hint,
            &board,
            Player::X,
            &MctsConfig::default().with_rollouts(300),
            true,
            &mut rng(3),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["cell"], 2);
        assert_eq!(value["row"], 0);
        assert_eq!(value["col"], 2);
        assert_eq!(value["player"], "X");
        assert_eq!(value["rollouts"], 150);
        assert_eq!(value["tree"]["root_visits"], 150);
    }

    #[test]
    fn self_play_game_ends_with_legal_history() {
        let config = MctsConfig::for_testing();
        for size in [3usize, 4] {
            let record = play_self_game(size, &config, &mut rng(size as u64)).unwrap();
            assert!(record.outcome.is_over());
            assert!(!record.moves.is_empty());

            let mut seen = record.moves.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), record.moves.len(), "cell played twice");
            assert!(record.moves.iter().all(|&cell| cell < size * size));
        }
    }

    #[test]
    fn self_play_tally_counts_every_game() {
        let config = MctsConfig::for_testing().with_rollouts(50);
        let mut out = Vec::new();

        let tally = run_self_play(&mut out, 3, 4, &config, false, &mut rng(4)).unwrap();

        assert_eq!(tally.games, 4);
        assert_eq!(tally.x_wins + tally.o_wins + tally.draws, 4);
        assert!(String::from_utf8(out).unwrap().starts_with("games: 4"));
    }

    #[test]
    fn tally_ignores_unfinished_outcome() {
        let mut tally = Tally::default();
        tally.record(&Outcome::Draw);
        tally.record(&Outcome::Won {
            winner: Player::O,
            line: vec![0, 1, 2],
        });
        tally.record(&Outcome::InProgress);

        assert_eq!(
            tally,
            Tally {
                games: 2,
                x_wins: 0,
                o_wins: 1,
                draws: 1,
            }
        );
    }
}
