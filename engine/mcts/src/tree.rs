//! MCTS search tree with arena allocation.
//!
//! The tree uses arena allocation for node storage. Nodes live in a
//! contiguous Vec and reference each other through NodeId indices, so a
//! child can walk back to its parent without shared ownership.

use games_tictactoe::{Board, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::node::{NodeId, TreeNode};

/// Exploration constant used when none is configured (≈ √2).
pub const DEFAULT_EXPLORATION: f64 = 1.414;

/// Errors raised when a search cannot be set up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Player and opponent must be different symbols (both are {0})")]
    SamePlayers(Player),
}

/// One search invocation: the arena, the fixed perspective and the rollout RNG.
#[derive(Debug)]
pub struct SearchTree {
    /// Arena storing all nodes
    nodes: Vec<TreeNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,

    player: Player,
    opponent: Player,
    exploration: f64,
    rng: ChaCha20Rng,
}

impl SearchTree {
    /// Build a tree whose root is `board` with `player` to move.
    ///
    /// The board is taken by value; the search never touches the caller's copy.
    pub fn new(
        board: Board,
        player: Player,
        opponent: Player,
        rng: ChaCha20Rng,
    ) -> Result<Self, SearchError> {
        if player == opponent {
            return Err(SearchError::SamePlayers(player));
        }
        Ok(Self::for_player(board, player, rng))
    }

    /// Build a tree for `player` against the other symbol.
    pub fn for_player(board: Board, player: Player, rng: ChaCha20Rng) -> Self {
        Self {
            nodes: vec![TreeNode::new_root(board, player)],
            root: NodeId(0),
            player,
            opponent: player.opponent(),
            exploration: DEFAULT_EXPLORATION,
            rng,
        }
    }

    /// Convenience constructor with a seeded ChaCha RNG.
    pub fn with_seed(
        board: Board,
        player: Player,
        opponent: Player,
        seed: u64,
    ) -> Result<Self, SearchError> {
        Self::new(board, player, opponent, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn opponent(&self) -> Player {
        self.opponent
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.get(self.root).state.size()
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Pick the child of a fully expanded node to descend into.
    ///
    /// The first unvisited child is taken immediately. Otherwise the child
    /// with the highest UCB1 score wins, ties going to the earliest child.
    /// Returns None if the node has no children.
    pub fn select_child(&self, node_id: NodeId) -> Option<NodeId> {
        let node = self.get(node_id);
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in &node.children {
            let child = self.get(child_id);
            if child.visits == 0 {
                return Some(child_id);
            }
            let score = child.ucb1(node.visits, self.exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Expand one untried move of `node_id` into a new child.
    ///
    /// The child's board is a copy of the parent's with the parent's
    /// `player_to_move` placed on the popped cell; the child's side to move
    /// is the other symbol. Returns None when nothing is left to expand.
    pub fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let node = self.get_mut(node_id);
        let action = node.untried_moves.pop()?;
        let mover = node.player_to_move;
        let state = node.state.with_move(action, mover);

        let child_id = self.allocate(TreeNode::new_child(
            node_id,
            action,
            state,
            mover.opponent(),
        ));
        self.get_mut(node_id).children.push(child_id);
        Some(child_id)
    }

    /// Backpropagate a reward from a leaf to the root.
    /// The reward is inverted (1 - r) at each level: a win for the side that
    /// moved into a node is a loss for the side that moved into its parent.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;
        let mut current_reward = reward;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.wins += current_reward;

            current_reward = 1.0 - current_reward;
            current_id = node.parent;
        }
    }

    /// Descend from `node_id` to the node the next rollout starts from.
    ///
    /// Fully expanded nodes are descended via [`Self::select_child`]. The
    /// first node with untried moves is expanded and the new child returned.
    /// A node with neither untried moves nor children (full board) is
    /// returned as is.
    pub fn select_node(&mut self, node_id: NodeId) -> NodeId {
        let mut current = node_id;

        while self.get(current).is_fully_expanded() {
            match self.select_child(current) {
                Some(child_id) => current = child_id,
                None => return current,
            }
        }

        self.expand(current).unwrap_or(current)
    }

    /// Run one select -> expand -> simulate -> backpropagate iteration.
    pub fn iterate(&mut self) {
        let leaf_id = self.select_node(self.root);
        let reward = self.nodes[leaf_id.0 as usize].simulate(&mut self.rng);
        self.backpropagate(leaf_id, reward);

        trace!(leaf = leaf_id.0, reward, "MCTS rollout complete");
    }

    /// Run `budget` iterations and return the root child with the best win rate.
    ///
    /// Returns None when the root has no children: a zero budget, or a board
    /// with no empty cell.
    pub fn find_best_move(&mut self, budget: u32) -> Option<usize> {
        for _ in 0..budget {
            self.iterate();
        }

        self.best_child().and_then(|id| self.get(id).action)
    }

    /// Root child with the highest win rate. Unvisited children count as 0.0;
    /// ties go to the earliest child.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let (&first, rest) = root.children.split_first()?;

        let mut best = first;
        let mut best_rate = self.get(first).win_rate();
        for &child_id in rest {
            let rate = self.get(child_id).win_rate();
            if rate > best_rate {
                best = child_id;
                best_rate = rate;
            }
        }
        Some(best)
    }

    /// Root children as (cell, visits, win rate), in expansion order.
    pub fn root_children(&self) -> Vec<(usize, u32, f64)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child
                    .action
                    .map(|action| (action, child.visits, child.win_rate()))
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Children are always allocated after their parent, so one forward
        // pass over the arena sees every parent depth before its children.
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depths[idx] = depths[node.parent.0 as usize] + 1;
                max_depth = max_depth.max(depths[idx]);
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_children: usize,
    pub max_depth: u32,
}
