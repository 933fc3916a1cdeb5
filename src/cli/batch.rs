//! Batch command implementation.

use super::output::{format_batch_csv, format_batch_text, JsonBatchResult};
use super::{resolve_seed, BatchFormat, CliError, RulesArg, StrategyArg};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use tilemerge::batch::{run_game, BatchConfig, BatchStats};
use tilemerge::Strategy;

/// Play `games` games starting at `base_seed` and aggregate them.
///
/// Each game gets seed `base_seed + i`, so the totals do not depend on how
/// rayon splits the range.
pub(crate) fn run_batch(
    games: u64,
    base_seed: u64,
    strategy: Strategy,
    config: &BatchConfig,
    progress: Option<&ProgressBar>,
) -> BatchStats {
    (0..games)
        .into_par_iter()
        .fold(BatchStats::new, |mut local_stats, i| {
            let result = run_game(base_seed.wrapping_add(i), strategy, config);
            local_stats.add_result(&result);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(BatchStats::new, |mut a, b| {
            a.merge(&b);
            a
        })
}

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the thread pool cannot be built or JSON output fails.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    strategy: StrategyArg,
    threads: Option<usize>,
    max_moves: u32,
    rules: RulesArg,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let strategy = Strategy::from(strategy);
    let base_seed = resolve_seed(seed);
    let config = BatchConfig {
        max_moves,
        game: rules.config(),
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = threads {
        builder = builder.num_threads(num_threads);
    }
    let pool = builder
        .build()
        .map_err(|e| CliError::new(format!("Failed to build thread pool: {e}")))?;

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    tracing::info!(games, base_seed, %strategy, threads = pool.current_num_threads(), "starting batch");
    let start = Instant::now();

    let stats = pool.install(|| run_batch(games, base_seed, strategy, &config, pb.as_ref()));

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats, strategy.name()));
            println!();
            println!(
                "Seeds: {base_seed}..{}",
                base_seed.wrapping_add(games)
            );
            println!("Duration: {:.2}s ({games_per_sec:.0} games/sec)", duration.as_secs_f64());
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats, strategy.name());
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats, strategy.name()));
        }
    }

    Ok(())
}
