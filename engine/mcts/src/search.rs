//! Search entry points.
//!
//! Every call builds a fresh [`SearchTree`] from a copy of the caller's
//! board, runs the whole budget synchronously and throws the tree away.

use games_tictactoe::{Board, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::MctsConfig;
use crate::tree::{SearchError, SearchTree, TreeStats};

/// Cell index reported when no legal move exists.
pub const NO_MOVE: i64 = -1;

/// Result of an MCTS search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Chosen cell, None when the root had no children
    pub action: Option<usize>,

    /// Symbol the search was run for
    pub player: Player,

    /// Number of iterations performed
    pub rollouts: u32,

    /// Win rate of the chosen child (0.0 without a move)
    pub win_rate: f64,

    pub tree: TreeStats,
}

impl SearchResult {
    /// Chosen cell as an integer, [`NO_MOVE`] when there is none.
    pub fn cell_index(&self) -> i64 {
        self.action.map_or(NO_MOVE, |cell| cell as i64)
    }
}

/// Run one search for `player` against `opponent` on a copy of `board`.
///
/// `rng` is only used to seed the tree's own generator, so two searches
/// never share random state.
pub fn run_mcts(
    board: &Board,
    player: Player,
    opponent: Player,
    rollouts: u32,
    exploration_constant: f64,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let tree = SearchTree::new(board.clone(), player, opponent, fork_rng(rng))?
        .with_exploration(exploration_constant);
    Ok(execute(tree, rollouts))
}

/// Choose the computer's move with the full rollout budget.
pub fn best_move(
    board: &Board,
    player: Player,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> SearchResult {
    let tree = SearchTree::for_player(board.clone(), player, fork_rng(rng))
        .with_exploration(config.exploration_constant);
    execute(tree, config.rollouts)
}

/// Suggest a move for `player` with the reduced hint budget.
pub fn hint(
    board: &Board,
    player: Player,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> SearchResult {
    let tree = SearchTree::for_player(board.clone(), player, fork_rng(rng))
        .with_exploration(config.exploration_constant);
    execute(tree, config.hint_rollouts())
}

fn fork_rng(rng: &mut ChaCha20Rng) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(rng.gen())
}

fn execute(mut tree: SearchTree, rollouts: u32) -> SearchResult {
    let action = tree.find_best_move(rollouts);
    let win_rate = tree
        .best_child()
        .map(|id| tree.get(id).win_rate())
        .unwrap_or(0.0);
    let stats = tree.stats();

    debug!(
        player = %tree.player(),
        size = tree.size(),
        rollouts,
        action = ?action,
        win_rate,
        nodes = stats.total_nodes,
        depth = stats.max_depth,
        "MCTS search complete"
    );

    SearchResult {
        action,
        player: tree.player(),
        rollouts,
        win_rate,
        tree: stats,
    }
}
