//! Constants for board geometry and engine parameters.
//!
//! The board is stored as a row-major 2D array with row 0 at the bottom.
//! Pawns drop into the lowest free row of a column.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Number of aligned pawns needed to win.
pub const WIN_LENGTH: usize = 4;

/// Directions scanned by the win check as (row delta, column delta).
///
/// Only the positive half of each line is needed: every run is found from
/// its lowest-indexed endpoint.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

// =============================================================================
// Text Format
// =============================================================================

/// Glyph used for an empty cell.
pub const EMPTY_GLYPH: char = '-';

/// Glyph for [`crate::board::Pawn::PlayerA`].
pub const PLAYER_A_GLYPH: char = '0';

/// Glyph for [`crate::board::Pawn::PlayerB`].
pub const PLAYER_B_GLYPH: char = '1';

// =============================================================================
// Simulation Parameters
// =============================================================================

/// Default number of playouts per evaluation.
pub const N_PLAYOUTS: usize = 5000;

/// Default number of worker threads (1 runs the sequential evaluator).
pub const N_THREADS: usize = 1;
