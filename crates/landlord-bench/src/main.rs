use std::path::PathBuf;

use clap::Parser;

use landlord_bench::config::{BenchmarkConfig, ResolvedOutputs};
use landlord_bench::logging::init_logging;
use landlord_bench::tournament::TournamentRunner;

/// Tournament benchmarking harness for landlord bots.
#[derive(Debug, Parser)]
#[command(
    name = "landlord-bench",
    author,
    version,
    about = "Deterministic fight-the-landlord tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seat permutations per deal (at most 6).
    #[arg(long, value_name = "COUNT")]
    permutations: Option<usize>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.deals.games = games;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if let Some(permutations) = cli.permutations {
        config.deals.permutations = permutations;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.deals.games;
    let permutations = config.deals.permutations;

    println!(
        "Loaded configuration '{run_id}' ({games} games, {permutations} permutations, max bid {})",
        config.rules.max_bid
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} games × {} permutations → {} rows at {}",
        summary.games_played,
        summary.permutations,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    if summary.voided_games > 0 {
        println!(
            "{} game(s) voided after running out of redeals",
            summary.voided_games
        );
    }
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
