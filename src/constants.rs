//! Constants for board geometry, search parameters, and CLI defaults.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Classic tic-tac-toe.
pub const DEFAULT_SIZE: usize = 3;

/// Largest board the CLI accepts. Alignment scans are O(N²) per judge call,
/// so anything much bigger makes random playouts crawl.
pub const MAX_SIZE: usize = 16;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// UCB1 exploration factor: `sqrt(C * ln(total / visits))`.
pub const UCB_EXPLORATION: f64 = 2.0;

/// Search cycles per decision. The engine grows one rollout per move.
pub const DEFAULT_ROLLOUTS: u32 = 1;

// =============================================================================
// Rendering
// =============================================================================

/// Glyph for the board owner's marks.
pub const GLYPH_MINE: char = 'o';

/// Glyph for the opponent's marks.
pub const GLYPH_OPPONENT: char = 'x';

/// Glyph for a vacant cell.
pub const GLYPH_VACANT: char = ' ';
