//! connect4-montecarlo: suggest a Connect Four move by random playouts.
//!
//! ## Usage
//!
//! - `connect4-montecarlo 1 < board.txt` - Evaluate the board for pawn `1`
//! - `connect4-montecarlo 0 -f board.txt -n 20000 -j 4` - More playouts, four threads
//!
//! The board is 6 lines of 7 characters, top row first: `-` for an empty
//! cell, `0` and `1` for the two pawns. The selected pawn is the one to move.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use connect4_montecarlo::board::{Board, Pawn};
use connect4_montecarlo::constants::{N_PLAYOUTS, N_THREADS};
use connect4_montecarlo::simulator::{Simulation, Simulator};

/// Suggest the next Connect Four move by Monte Carlo playouts
#[derive(Parser)]
#[command(name = "connect4-montecarlo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pawn to evaluate for and to move next (0 or 1)
    #[arg(value_parser = parse_pawn)]
    pawn: Pawn,

    /// Read the board from this file instead of standard input
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of random playouts
    #[arg(short = 'n', long, default_value_t = N_PLAYOUTS)]
    playouts: usize,

    /// Number of worker threads
    #[arg(short = 'j', long, default_value_t = N_THREADS)]
    threads: usize,

    /// Seed for reproducible results
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_pawn(s: &str) -> std::result::Result<Pawn, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(cli: &Cli) -> Result<()> {
    let board = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            Board::read_from(BufReader::new(file), cli.pawn)
                .with_context(|| format!("cannot load board from {}", path.display()))?
        }
        None => Board::read_from(io::stdin().lock(), cli.pawn)
            .context("cannot load board from standard input")?,
    };

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    info!(
        "evaluating for pawn {} with {} playouts on {} thread(s)",
        cli.pawn, cli.playouts, cli.threads
    );
    let simulator = Simulator::new(cli.pawn);
    let simulation = simulator.eval_best_move_parallel(&board, cli.playouts, cli.threads, &mut rng);

    print!("{board}");
    println!();
    print_simulation(&simulation);
    Ok(())
}

fn print_simulation(simulation: &Simulation) {
    match simulation.best() {
        Ok(col) => println!("best move: {col}"),
        Err(err) => println!("best move: none ({err})"),
    }
    println!("win rates:");
    for (col, rate) in simulation.win_rates.iter().enumerate() {
        println!("  {col} : {rate}");
    }
}
