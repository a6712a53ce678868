//! Connect Four move evaluation by Monte Carlo playouts.
//!
//! Given a position and the pawn to root for, every legal column is scored by
//! playing many random games that open with it and counting how often the
//! rooting pawn ends up winning.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine defaults
//! - [`board`] - Game state, move application, win detection, text format
//! - [`playout`] - Random game simulation
//! - [`simulator`] - Win-rate estimation and move ranking
//! - [`error`] - Error type shared by the crate
//!
//! ## Example
//!
//! ```
//! use connect4_montecarlo::board::{Board, Pawn};
//! use connect4_montecarlo::simulator::Simulator;
//!
//! let text = "-------\n-------\n-------\n----1--\n--0010-\n0-10101\n";
//! let board = Board::parse(text, Pawn::PlayerB).unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let simulation = Simulator::new(Pawn::PlayerB).eval_best_move(&board, 1000, &mut rng);
//! assert_eq!(simulation.best_move, Some(4));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod playout;
pub mod simulator;

pub use error::{GameError, Result};
