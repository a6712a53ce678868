//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves until one side connects
//! four or the board fills up. The random source is passed in by the caller
//! so playouts can be replayed from a seed.

use fastrand::Rng;

use crate::board::{Board, Pawn};
use crate::constants::COLS;

/// Play random moves on `board` until the game ends.
///
/// Returns the winner, or `None` for a draw. The board is left in its final
/// position.
pub fn playout(board: &mut Board, rng: &mut Rng) -> Option<Pawn> {
    if let Some(winner) = board.find_winner() {
        return Some(winner);
    }

    while !board.has_finished() {
        let Some(col) = choose_random_move(board, rng) else {
            break;
        };
        // Only legal columns are ever chosen.
        if board.play(col).is_err() {
            break;
        }
        if let Some(winner) = board.find_winner() {
            return Some(winner);
        }
    }

    None
}

/// Pick a uniformly random column among the currently legal ones.
pub fn choose_random_move(board: &Board, rng: &mut Rng) -> Option<usize> {
    let mut candidates = [0; COLS];
    let mut n = 0;
    for col in board.legal_moves() {
        candidates[n] = col;
        n += 1;
    }

    if n == 0 {
        return None;
    }
    Some(candidates[rng.usize(..n)])
}
