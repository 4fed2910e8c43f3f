use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use connect_four_td::ai::TdLearner;
use connect_four_td::config::AppConfig;
use connect_four_td::training::{Trainer, TrainingMode};

/// Train the Connect Four TD learner against a scripted opponent.
#[derive(Parser)]
#[command(name = "train", about = "Train a Connect Four TD(0) agent")]
struct Cli {
    /// Opponent: perfect, semi, weak, random or selfplay
    #[arg(long)]
    mode: Option<TrainingMode>,

    /// Override number of training games
    #[arg(long)]
    games: Option<usize>,

    /// Override the minimax search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the value table file
    #[arg(long)]
    values: Option<PathBuf>,

    /// Override the statistics file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Seed every random choice for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.mode {
        app_config.training.mode = mode;
    }
    if let Some(games) = cli.games {
        app_config.training.num_games = games;
    }
    if let Some(depth) = cli.depth {
        app_config.search.depth = depth;
    }
    if let Some(values) = cli.values {
        app_config.storage.values_path = values;
    }
    if let Some(stats) = cli.stats {
        app_config.storage.stats_path = stats;
    }
    if cli.seed.is_some() {
        app_config.training.seed = cli.seed;
    }
    app_config
        .validate()
        .context("validating configuration overrides")?;

    if cli.print_config {
        let toml = toml::to_string_pretty(&app_config).context("serializing configuration")?;
        println!("{toml}");
        return Ok(());
    }

    let learner = match app_config.training.seed {
        Some(seed) => TdLearner::with_seed(app_config.learning.clone(), seed),
        None => TdLearner::new(app_config.learning.clone()),
    };
    let mut learner = learner.with_store(&app_config.storage.values_path);

    let mut trainer = Trainer::new(app_config.training.clone(), app_config.search.clone())
        .with_stats(&app_config.storage.stats_path);

    let summary = trainer
        .train(&mut learner)
        .context("training run failed")?;

    learner
        .flush()
        .with_context(|| {
            format!(
                "saving value table to {}",
                app_config.storage.values_path.display()
            )
        })?;
    info!(
        "value table: {} ({} states)",
        app_config.storage.values_path.display(),
        summary.states_known
    );

    let mode = app_config.training.mode;
    let lifetime = trainer.stats().mode(mode.as_str());
    println!("-------------------------------------------");
    println!(
        "This run ({} vs {}): {} wins, {} draws, {} losses, {} exploratory moves",
        summary.games, mode, summary.wins, summary.draws, summary.losses, summary.explorations
    );
    println!(
        "Lifetime in {} mode: {} games, learner {:.1}% | opponent {} | draws {}",
        mode,
        lifetime.games,
        lifetime.win_rate() * 100.0,
        lifetime.opponent_wins,
        lifetime.draws
    );
    println!("All modes: {} games", trainer.stats().total_games);

    Ok(())
}
