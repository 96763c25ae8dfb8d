//! MCTS tree node representation.
//!
//! Each node owns a full snapshot of the board reached by applying `action`
//! to the parent's board. Nodes store the visit statistics used for UCB1
//! selection and the frontier of moves not yet expanded.

use games_tictactoe::{detect_win, Board, Player};
use rand::Rng;

/// Reward for a rollout that fills the board without a winner.
pub const DRAW_REWARD: f64 = 0.5;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Cell index played on the parent's board to reach this node (None for root)
    pub action: Option<usize>,

    /// Board snapshot at this node, never shared with other nodes
    pub state: Board,

    /// Symbol that moves next from this state
    pub player_to_move: Player,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Empty cells not yet expanded into children
    pub untried_moves: Vec<usize>,

    /// Number of simulations backpropagated through this node
    pub visits: u32,

    /// Accumulated reward, each simulation contributing a value in [0, 1]
    pub wins: f64,
}

impl TreeNode {
    /// Create a new root node.
    pub fn new_root(state: Board, player_to_move: Player) -> Self {
        Self::new(state, NodeId::NONE, None, player_to_move)
    }

    /// Create a new child node reached by playing `action` from `parent`.
    pub fn new_child(parent: NodeId, action: usize, state: Board, player_to_move: Player) -> Self {
        Self::new(state, parent, Some(action), player_to_move)
    }

    fn new(state: Board, parent: NodeId, action: Option<usize>, player_to_move: Player) -> Self {
        let untried_moves = state.legal_moves();
        Self {
            parent,
            action,
            state,
            player_to_move,
            children: Vec::new(),
            untried_moves,
            visits: 0,
            wins: 0.0,
        }
    }

    /// Observed win rate `wins / visits`. Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1 score of this node as seen from a parent with `parent_visits`.
    ///
    /// UCB1 = wins / visits + c * sqrt(ln(N_parent) / visits)
    ///
    /// Unvisited nodes score +infinity so they are always tried first.
    #[inline]
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.win_rate() + exploration * ((parent_visits as f64).ln() / visits).sqrt()
    }

    /// No untried moves remain. A fully expanded node with no children is a
    /// full board.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Play uniformly random moves from this node's board until someone
    /// completes a line or the board fills up.
    ///
    /// The reward is scored for the side that moved into this node (the
    /// opponent of `player_to_move`, frozen when the rollout starts): 1.0 if
    /// that side owns the first line found, 0.0 if the other side does, and
    /// [`DRAW_REWARD`] for a full board. A full board is a draw even when
    /// its last move completed a line; otherwise the side that made the
    /// previous move is checked for a completed line before every random move.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let scored = self.player_to_move.opponent();
        let mut board = self.state.clone();
        let mut rolling = self.player_to_move;

        loop {
            let legal = board.legal_moves();
            if legal.is_empty() {
                return DRAW_REWARD;
            }

            let last_mover = rolling.opponent();
            if detect_win(&board, last_mover).is_some() {
                return if last_mover == scored { 1.0 } else { 0.0 };
            }

            let cell = legal[rng.gen_range(0..legal.len())];
            board.place(cell, rolling);
            rolling = rolling.opponent();
        }
    }
}
