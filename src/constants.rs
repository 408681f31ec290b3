//! Constants for board dimensions, generator budgets, and move offsets.
//!
//! These are the defaults; every one of them that matters at runtime can be
//! overridden through [`GeneratorConfig`](crate::generator::GeneratorConfig)
//! or the command line.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const BOARD_SIZE: usize = 8;

/// Largest supported board size. Columns are lettered `a..=z`.
pub const MAX_BOARD_SIZE: usize = 26;

// =============================================================================
// Game Parameters
// =============================================================================

/// Number of mushrooms placed in a new game.
pub const MUSHROOMS_COUNT: usize = 5;

// =============================================================================
// Path Generator Budgets
// =============================================================================

/// Random starting squares tried before giving up.
pub const MAX_ATTEMPTS: usize = 300;

/// Backtracking steps allowed within a single attempt.
pub const MAX_STEPS: usize = 10_000;

// =============================================================================
// Move Offsets
// =============================================================================

/// Knight jumps as (row, column) deltas.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Diagonal rays as (row, column) steps. Order: SE, SW, NE, NW
pub const DIAGONALS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
