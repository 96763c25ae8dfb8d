//! Monte Carlo Tree Search (MCTS) with random rollouts for NxN tic-tac-toe.
//!
//! # Overview
//!
//! Each search builds a fresh tree rooted at a copy of the caller's board and
//! runs a fixed number of iterations. Every iteration has four phases:
//!
//! 1. **Selection**: Descend through fully expanded nodes using UCB1 to
//!    balance exploration and exploitation
//! 2. **Expansion**: Add one child for an untried move
//! 3. **Simulation**: Play uniformly random moves until a line is completed
//!    or the board fills up
//! 4. **Backpropagation**: Walk back to the root, flipping the reward at
//!    every level so each node scores its own mover
//!
//! After the budget is spent the root child with the highest win rate is
//! chosen.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_tictactoe::{Board, Player};
//! use mcts::{best_move, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board: Board = "XX. / OO. / ...".parse().unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = best_move(&board, Player::X, &MctsConfig::default(), &mut rng);
//!
//! println!("Best cell: {}", result.cell_index());
//! println!("Win rate: {:.3}", result.win_rate);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `rollouts`: Iterations per move (default: 2000)
//! - `exploration_constant`: UCB1 constant (default: 1.414)
//! - `hint_rollout_cap`: Upper bound on hint iterations (default: 500)

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{NodeId, TreeNode, DRAW_REWARD};
pub use search::{best_move, hint, run_mcts, SearchResult, NO_MOVE};
pub use tree::{SearchError, SearchTree, TreeStats, DEFAULT_EXPLORATION};
