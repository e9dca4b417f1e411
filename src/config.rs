//! MCTS player configuration.

use crate::constants::DEFAULT_ROLLOUTS;

/// Configuration for the MCTS player.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Take the center cell of an odd-sized board as a fixed opening,
    /// without consulting the tree.
    pub center_first: bool,

    /// Search cycles (rollouts) run before each decision.
    /// The reference engine runs exactly one.
    pub rollouts_per_move: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            center_first: false,
            rollouts_per_move: DEFAULT_ROLLOUTS,
        }
    }
}

impl MctsConfig {
    /// Reference behavior plus the center-first opening.
    pub fn with_center_first() -> Self {
        Self {
            center_first: true,
            ..Self::default()
        }
    }

    /// Run `rollouts` cycles per decision. Zero is bumped to one, since a
    /// decision needs at least one expansion of the cursor.
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts_per_move = rollouts.max(1);
        self
    }
}
