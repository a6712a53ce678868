//! Integration tests for connect4-montecarlo
//!
//! Board fixtures live in tests/data/:
//! - demo1.txt - mid-game position where pawn 1 wins by playing column 4
//! - demo2.txt - full board without any four in a row

use std::fs::File;
use std::path::Path;

use connect4_montecarlo::GameError;
use connect4_montecarlo::board::{Board, Grid, Pawn};
use connect4_montecarlo::constants::{COLS, ROWS};
use connect4_montecarlo::simulator::Simulator;

// =============================================================================
// Helper functions
// =============================================================================

fn load(name: &str, turn: Pawn) -> Board {
    let path = Path::new("tests/data").join(name);
    let file = File::open(&path).unwrap_or_else(|e| panic!("cannot open {}: {e}", path.display()));
    Board::read_from(file, turn).unwrap()
}

fn demo1() -> Board {
    load("demo1.txt", Pawn::PlayerB)
}

/// Board holding exactly the given pawns, everything else empty.
fn board_with(cells: &[(usize, usize, Pawn)], turn: Pawn) -> Board {
    let mut grid: Grid = [[None; COLS]; ROWS];
    for &(row, col, pawn) in cells {
        grid[row][col] = Some(pawn);
    }
    Board::from_grid(grid, turn).unwrap()
}

/// Play `n` random legal moves, checking the board invariants after each one.
fn random_game(seed: u64, n: usize) -> Board {
    let mut rng = fastrand::Rng::with_seed(seed);
    let start = if seed % 2 == 0 { Pawn::PlayerA } else { Pawn::PlayerB };
    let mut board = Board::new(start);
    for played in 1..=n {
        let legal: Vec<usize> = board.legal_moves().collect();
        if legal.is_empty() {
            break;
        }
        board.play(legal[rng.usize(..legal.len())]).unwrap();
        assert_gravity(&board);
        let expected = if played % 2 == 0 { start } else { start.opponent() };
        assert_eq!(board.turn(), expected, "turn after {played} moves");
    }
    board
}

fn assert_gravity(board: &Board) {
    for col in 0..COLS {
        let height = board.fill(col);
        for row in 0..ROWS {
            assert_eq!(
                board.get(row, col).is_some(),
                row < height,
                "cell ({row}, {col}) with fill {height}"
            );
        }
    }
}

// =============================================================================
// Board fixture tests
// =============================================================================

#[test]
fn test_show() {
    assert_eq!(
        demo1().to_string(),
        "-------\n-------\n-------\n----1--\n--0010-\n0-10101\n"
    );
}

#[test]
fn test_fill_is_derived() {
    let board = demo1();
    let fill: Vec<usize> = (0..COLS).map(|c| board.fill(c)).collect();
    assert_eq!(fill, vec![1, 0, 2, 2, 3, 2, 1]);
    assert_eq!(board.pawn_count(), 11);
}

#[test]
fn test_move() {
    let mut board = demo1();
    board.play(4).unwrap();
    assert_eq!(
        board.to_string(),
        "-------\n-------\n----1--\n----1--\n--0010-\n0-10101\n"
    );
    assert_eq!(board.get(3, 4), Some(Pawn::PlayerB));
}

#[test]
fn test_move_chained() {
    let mut board = demo1();
    board.play(4).unwrap().play(4).unwrap();
    assert_eq!(
        board.to_string(),
        "-------\n----0--\n----1--\n----1--\n--0010-\n0-10101\n"
    );
}

#[test]
fn test_find_winner() {
    let mut board = demo1();
    assert_eq!(board.find_winner(), None);
    assert_eq!(board.play(4).unwrap().find_winner(), Some(Pawn::PlayerB));
}

#[test]
fn test_has_not_finished() {
    assert!(!demo1().has_finished());
}

#[test]
fn test_has_finished() {
    let board = load("demo2.txt", Pawn::PlayerB);
    assert!(board.has_finished());
    assert_eq!(board.find_winner(), None);
    assert_eq!(board.legal_moves().count(), 0);
    for col in 0..COLS {
        assert!(!board.is_valid_move(col));
    }
}

#[test]
fn test_full_board_with_winner_is_finished() {
    let mut board = Board::new(Pawn::PlayerA);
    for col in 0..COLS {
        for _ in 0..ROWS {
            board.play(col).unwrap();
        }
    }
    assert!(board.has_finished());
    assert!(board.find_winner().is_some());
}

// =============================================================================
// Win detection
// =============================================================================

#[test]
fn test_horizontal_win() {
    let p = Pawn::PlayerA;
    let board = board_with(&[(0, 2, p), (0, 3, p), (0, 4, p), (0, 5, p)], p);
    assert_eq!(board.find_winner(), Some(p));
}

#[test]
fn test_vertical_win() {
    let p = Pawn::PlayerB;
    let board = board_with(&[(0, 6, p), (1, 6, p), (2, 6, p), (3, 6, p)], p);
    assert_eq!(board.find_winner(), Some(p));
}

#[test]
fn test_rising_diagonal_win() {
    let a = Pawn::PlayerA;
    let b = Pawn::PlayerB;
    let board = board_with(
        &[
            (0, 0, a),
            (0, 1, b),
            (1, 1, a),
            (0, 2, b),
            (1, 2, b),
            (2, 2, a),
            (0, 3, b),
            (1, 3, b),
            (2, 3, b),
            (3, 3, a),
        ],
        b,
    );
    assert_eq!(board.find_winner(), Some(a));
}

#[test]
fn test_falling_diagonal_win() {
    let a = Pawn::PlayerA;
    let b = Pawn::PlayerB;
    let board = board_with(
        &[
            (0, 3, a),
            (0, 2, b),
            (1, 2, a),
            (0, 1, b),
            (1, 1, b),
            (2, 1, a),
            (0, 0, b),
            (1, 0, a),
            (2, 0, b),
            (3, 0, a),
        ],
        b,
    );
    assert_eq!(board.find_winner(), Some(a));
}

#[test]
fn test_three_in_a_row_is_not_a_win() {
    let p = Pawn::PlayerA;
    let board = board_with(&[(0, 0, p), (0, 1, p), (0, 2, p), (1, 0, p), (2, 0, p)], p);
    assert_eq!(board.find_winner(), None);
}

#[test]
fn test_queries_are_idempotent() {
    let mut board = demo1();
    board.play(4).unwrap();
    let snapshot = board;
    for _ in 0..5 {
        assert_eq!(board.find_winner(), Some(Pawn::PlayerB));
        assert!(!board.has_finished());
    }
    assert_eq!(board, snapshot);
}

// =============================================================================
// Move legality and invariants
// =============================================================================

#[test]
fn test_full_column_is_rejected() {
    let mut board = Board::new(Pawn::PlayerA);
    for _ in 0..ROWS {
        assert!(board.is_valid_move(2));
        board.play(2).unwrap();
    }
    assert!(!board.is_valid_move(2));
    let before = board;
    assert!(matches!(board.play(2), Err(GameError::IllegalMove(2))));
    assert_eq!(board, before);
}

#[test]
fn test_gravity_and_turn_over_random_games() {
    for seed in 0..40 {
        let board = random_game(seed, ROWS * COLS);
        assert!(board.has_finished());
    }
}

#[test]
fn test_parse_round_trips_random_positions() {
    for seed in 100..120 {
        let board = random_game(seed, (seed as usize) % (ROWS * COLS));
        let parsed = Board::parse(&board.to_string(), board.turn()).unwrap();
        assert_eq!(parsed, board);
    }
}

#[test]
fn test_malformed_fixture_is_rejected() {
    let text = "-------\n-------\n-------\n----1--\n--0?10-\n0-10101\n";
    assert!(matches!(
        Board::parse(text, Pawn::PlayerB),
        Err(GameError::MalformedCell { row: 1, col: 3, glyph: '?' })
    ));
}

#[test]
fn test_floating_pawn_in_text_is_rejected() {
    let text = "-------\n-------\n-------\n-1-----\n-------\n-------\n";
    assert!(matches!(
        Board::parse(text, Pawn::PlayerA),
        Err(GameError::FloatingPawn { row: 2, col: 1 })
    ));
}

// =============================================================================
// Simulator on fixtures
// =============================================================================

#[test]
fn test_simulate_winning_move() {
    let board = demo1();
    let simulator = Simulator::new(Pawn::PlayerB);
    let mut rng = fastrand::Rng::with_seed(5);
    assert_eq!(
        simulator.simulate_move(&board, 4, &mut rng).unwrap(),
        Some(Pawn::PlayerB)
    );
}

#[test]
fn test_best_move() {
    let board = demo1();
    let simulator = Simulator::new(Pawn::PlayerB);
    for seed in 0..3 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let simulation = simulator.eval_best_move(&board, 2000, &mut rng);
        assert_eq!(simulation.best_move, Some(4));
        assert_eq!(simulation.win_rates[4], 1.0);
        assert_eq!(simulation.playouts(), 2000);
    }
}

#[test]
fn test_best_move_parallel() {
    let board = demo1();
    let simulator = Simulator::new(Pawn::PlayerB);
    let mut rng = fastrand::Rng::with_seed(9);
    let simulation = simulator.eval_best_move_parallel(&board, 2001, 4, &mut rng);
    assert_eq!(simulation.best_move, Some(4));
    assert_eq!(simulation.playouts(), 2001);
}

#[test]
fn test_parallel_is_reproducible() {
    let board = demo1();
    let simulator = Simulator::new(Pawn::PlayerA);
    let a = simulator.eval_best_move_parallel(&board, 500, 3, &mut fastrand::Rng::with_seed(77));
    let b = simulator.eval_best_move_parallel(&board, 500, 3, &mut fastrand::Rng::with_seed(77));
    assert_eq!(a, b);
}

#[test]
fn test_win_rates_are_bounded() {
    let board = demo1();
    for pawn in [Pawn::PlayerA, Pawn::PlayerB] {
        let mut rng = fastrand::Rng::with_seed(13);
        let simulation = Simulator::new(pawn).eval_best_move(&board, 300, &mut rng);
        for (col, &rate) in simulation.win_rates.iter().enumerate() {
            assert!((0.0..=1.0).contains(&rate), "column {col}: {rate}");
            if simulation.tally.trials[col] == 0 {
                assert_eq!(rate, 0.0);
            }
        }
    }
}

#[test]
fn test_illegal_columns_report_zero() {
    let mut board = Board::new(Pawn::PlayerA);
    for _ in 0..ROWS {
        board.play(1).unwrap();
    }
    let mut rng = fastrand::Rng::with_seed(21);
    let simulation = Simulator::new(Pawn::PlayerA).eval_best_move(&board, 700, &mut rng);
    assert_eq!(simulation.tally.trials[1], 0);
    assert_eq!(simulation.win_rates[1], 0.0);
    assert_ne!(simulation.best_move, Some(1));
}

#[test]
fn test_no_legal_moves() {
    let board = load("demo2.txt", Pawn::PlayerA);
    let simulator = Simulator::new(Pawn::PlayerA);
    let mut rng = fastrand::Rng::with_seed(1);
    for simulation in [
        simulator.eval_best_move(&board, 100, &mut rng),
        simulator.eval_best_move_parallel(&board, 100, 4, &mut rng),
    ] {
        assert_eq!(simulation.best_move, None);
        assert!(matches!(simulation.best(), Err(GameError::NoLegalMoves)));
        assert_eq!(simulation.win_rates, [0.0; COLS]);
        assert_eq!(simulation.playouts(), 0);
    }
}
