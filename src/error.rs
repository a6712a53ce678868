use thiserror::Error;

use crate::constants::{COLS, ROWS};

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unrecognized glyph {glyph:?} at row {row}, column {col}")]
    MalformedCell { row: usize, col: usize, glyph: char },

    #[error("expected {ROWS} board rows, got {0}")]
    RowCount(usize),

    #[error("expected {COLS} cells in row {row}, got {width}")]
    RowWidth { row: usize, width: usize },

    #[error("pawn at row {row}, column {col} has an empty cell below it")]
    FloatingPawn { row: usize, col: usize },

    #[error("fill height of column {col} does not match its pawns")]
    FillMismatch { col: usize },

    #[error("column {0} is full or out of range")]
    IllegalMove(usize),

    #[error("no legal moves left on the board")]
    NoLegalMoves,

    #[error("invalid pawn {0:?}, expected 0 or 1")]
    InvalidPawn(String),

    #[error("failed to read board: {0}")]
    Io(#[from] std::io::Error),
}
