//! MCTS configuration parameters.

use crate::tree::DEFAULT_EXPLORATION;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Select/expand/simulate/backpropagate iterations for a real move.
    /// This is the difficulty knob: more rollouts play stronger but slower.
    pub rollouts: u32,

    /// Exploration constant for the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration_constant: f64,

    /// Upper bound on the rollouts spent on a hint.
    pub hint_rollout_cap: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            rollouts: 2000,
            exploration_constant: DEFAULT_EXPLORATION,
            hint_rollout_cap: 500,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            rollouts: 200,
            ..Self::default()
        }
    }

    /// Rollouts spent on a hint: half the move budget rounded up, capped.
    pub fn hint_rollouts(&self) -> u32 {
        self.rollouts.div_ceil(2).min(self.hint_rollout_cap)
    }

    /// Builder pattern: set number of rollouts.
    pub fn with_rollouts(mut self, n: u32) -> Self {
        self.rollouts = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the hint rollout cap.
    pub fn with_hint_rollout_cap(mut self, cap: u32) -> Self {
        self.hint_rollout_cap = cap;
        self
    }
}
