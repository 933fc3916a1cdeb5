//! Tilemerge CLI - play, script, replay and batch-run the merge puzzle.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Tilemerge - a deterministic 4x4 sliding-tile merge puzzle
#[derive(Parser, Debug)]
#[command(name = "tilemerge")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Spawn seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Win/loss rules
        #[arg(short, long, default_value = "standard")]
        rules: cli::RulesArg,

        /// Save recordings on exit: the last game to FILE, earlier games
        /// (started with `n`) to FILE-1, FILE-2, ...
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Play one game without interaction
    Run {
        /// Spawn seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Strategy used when no move script is given
        #[arg(long, default_value = "greedy")]
        strategy: cli::StrategyArg,

        /// Scripted inputs, e.g. "lurd" or "left,up,right"
        #[arg(short, long)]
        moves: Option<String>,

        /// Maximum board-changing moves (default: 10000)
        #[arg(long, default_value = "10000")]
        max_moves: u32,

        /// Win/loss rules
        #[arg(short, long, default_value = "standard")]
        rules: cli::RulesArg,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Only print the final board
        #[arg(short, long)]
        quiet: bool,
    },

    /// Apply a single move to a given board
    Shift {
        /// Board rows, e.g. "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0"
        #[arg(short, long)]
        grid: String,

        /// Direction: up, down, left, right (or u/d/l/r)
        #[arg(short, long)]
        direction: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Replay a recorded game
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Output format: tui or text
        #[arg(short, long, default_value = "tui")]
        format: cli::ReplayFormat,

        /// Start at a specific move
        #[arg(short, long = "move")]
        at_move: Option<usize>,

        /// Colour tiles in text output
        #[arg(long)]
        color: bool,
    },

    /// Run many automatic games in parallel and aggregate statistics
    Batch {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Strategy for every game
        #[arg(long, default_value = "greedy")]
        strategy: cli::StrategyArg,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum board-changing moves per game (default: 10000)
        #[arg(long, default_value = "10000")]
        max_moves: u32,

        /// Win/loss rules
        #[arg(short, long, default_value = "standard")]
        rules: cli::RulesArg,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::logging::init_tracing();
    cli::logging::install_panic_hook();

    let result = match args.command {
        Commands::Play { seed, rules, save } => cli::play::execute(seed, rules, save),

        Commands::Run {
            seed,
            strategy,
            moves,
            max_moves,
            rules,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, strategy, moves, max_moves, rules, format, save, quiet),

        Commands::Shift {
            grid,
            direction,
            format,
        } => cli::shift::execute(&grid, &direction, format),

        Commands::Replay {
            recording,
            format,
            at_move,
            color,
        } => cli::replay::execute(recording, format, at_move, color),

        Commands::Batch {
            games,
            seed,
            strategy,
            threads,
            max_moves,
            rules,
            format,
            progress,
        } => cli::batch::execute(games, seed, strategy, threads, max_moves, rules, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
