//! Move evaluation by Monte Carlo playouts.
//!
//! The simulator roots for one pawn. For every playout it samples a legal
//! opening column uniformly at random, plays it on a private copy of the
//! board, finishes the game with [`playout`], and records whether the rooting
//! pawn won. Columns are then ranked by their empirical win rate.
//!
//! Opening columns are sampled rather than scheduled, so trial counts differ
//! between columns. A legal column that was never sampled reports a rate of
//! 0.0, the same as a column that never won.

use std::thread;

use fastrand::Rng;
use log::{debug, trace};

use crate::board::{Board, Pawn};
use crate::constants::COLS;
use crate::error::{GameError, Result};
use crate::playout::playout;

/// Per-column playout counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Playouts that opened with each column
    pub trials: [u32; COLS],
    /// Playouts opened with each column that the rooting pawn won
    pub wins: [u32; COLS],
}

impl Tally {
    pub fn record(&mut self, col: usize, won: bool) {
        self.trials[col] += 1;
        if won {
            self.wins[col] += 1;
        }
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: &Tally) {
        for col in 0..COLS {
            self.trials[col] += other.trials[col];
            self.wins[col] += other.wins[col];
        }
    }

    /// Win rate of a column, or 0.0 if it was never tried.
    #[inline]
    pub fn win_rate(&self, col: usize) -> f64 {
        if self.trials[col] > 0 {
            self.wins[col] as f64 / self.trials[col] as f64
        } else {
            0.0
        }
    }

    pub fn total(&self) -> u32 {
        self.trials.iter().sum()
    }
}

/// Outcome of an evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    /// Estimated win rate per column (0.0 for illegal or untried columns)
    pub win_rates: [f64; COLS],
    /// Column with the highest win rate, `None` if no column was playable
    pub best_move: Option<usize>,
    /// Raw counts behind `win_rates`
    pub tally: Tally,
}

impl Simulation {
    /// The result for a board with no playable column.
    pub fn empty() -> Self {
        Self {
            win_rates: [0.0; COLS],
            best_move: None,
            tally: Tally::default(),
        }
    }

    /// Rank `legal` columns by their tallied win rate.
    ///
    /// Columns are scanned in ascending order and the best is only replaced
    /// on a strictly higher rate, so ties go to the lowest column.
    fn from_tally(tally: Tally, legal: &[usize]) -> Self {
        let mut win_rates = [0.0; COLS];
        let mut best: Option<(usize, f64)> = None;
        for &col in legal {
            let rate = tally.win_rate(col);
            win_rates[col] = rate;
            match best {
                Some((_, best_rate)) if rate <= best_rate => {}
                _ => best = Some((col, rate)),
            }
        }
        Self {
            win_rates,
            best_move: best.map(|(col, _)| col),
            tally,
        }
    }

    /// The recommended column, or [`GameError::NoLegalMoves`].
    pub fn best(&self) -> Result<usize> {
        self.best_move.ok_or(GameError::NoLegalMoves)
    }

    /// Number of playouts behind this result.
    pub fn playouts(&self) -> u32 {
        self.tally.total()
    }
}

/// Evaluates moves on behalf of one pawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Simulator {
    pawn: Pawn,
}

impl Simulator {
    pub fn new(pawn: Pawn) -> Self {
        Self { pawn }
    }

    pub fn pawn(&self) -> Pawn {
        self.pawn
    }

    /// Play `col` on a copy of `board`, then finish the game at random.
    ///
    /// Returns the winner, or `None` for a draw. `board` is never modified.
    pub fn simulate_move(&self, board: &Board, col: usize, rng: &mut Rng) -> Result<Option<Pawn>> {
        let mut scratch = *board;
        scratch.play(col)?;
        Ok(playout(&mut scratch, rng))
    }

    /// Estimate the win rate of every legal column with `playouts` random games.
    pub fn eval_best_move(&self, board: &Board, playouts: usize, rng: &mut Rng) -> Simulation {
        let legal: Vec<usize> = board.legal_moves().collect();
        if legal.is_empty() {
            debug!("no legal moves, skipping evaluation");
            return Simulation::empty();
        }

        let tally = self.run_playouts(board, &legal, playouts, rng);
        let simulation = Simulation::from_tally(tally, &legal);
        debug!(
            "evaluated {} playouts for pawn {}: best move {:?}",
            simulation.playouts(),
            self.pawn,
            simulation.best_move
        );
        simulation
    }

    /// Same as [`Simulator::eval_best_move`], spread over `threads` workers.
    ///
    /// Each worker gets its own random source seeded from `rng` and its own
    /// tally; tallies are summed once every worker is done. Results are
    /// reproducible for a given seed and thread count.
    pub fn eval_best_move_parallel(
        &self,
        board: &Board,
        playouts: usize,
        threads: usize,
        rng: &mut Rng,
    ) -> Simulation {
        let threads = threads.max(1);
        if threads == 1 {
            return self.eval_best_move(board, playouts, rng);
        }

        let legal: Vec<usize> = board.legal_moves().collect();
        if legal.is_empty() {
            debug!("no legal moves, skipping evaluation");
            return Simulation::empty();
        }

        // Seeds are drawn up front so the split does not depend on scheduling.
        let seeds: Vec<u64> = (0..threads).map(|_| rng.u64(..)).collect();
        let share = playouts / threads;
        let extra = playouts % threads;

        let mut tally = Tally::default();
        thread::scope(|s| {
            let handles: Vec<_> = seeds
                .iter()
                .enumerate()
                .map(|(i, &seed)| {
                    let budget = share + usize::from(i < extra);
                    let legal = &legal;
                    s.spawn(move || {
                        let mut worker_rng = Rng::with_seed(seed);
                        self.run_playouts(board, legal, budget, &mut worker_rng)
                    })
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(worker) => tally.merge(&worker),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
        });

        let simulation = Simulation::from_tally(tally, &legal);
        debug!(
            "evaluated {} playouts on {} threads for pawn {}: best move {:?}",
            simulation.playouts(),
            threads,
            self.pawn,
            simulation.best_move
        );
        simulation
    }

    fn run_playouts(&self, board: &Board, legal: &[usize], playouts: usize, rng: &mut Rng) -> Tally {
        let mut tally = Tally::default();
        for _ in 0..playouts {
            let col = legal[rng.usize(..legal.len())];
            match self.simulate_move(board, col, rng) {
                Ok(winner) => {
                    trace!("opening {col}: winner {winner:?}");
                    tally.record(col, winner == Some(self.pawn));
                }
                // `legal` comes from this board, so this cannot happen.
                Err(err) => debug!("skipping opening {col}: {err}"),
            }
        }
        tally
    }
}
