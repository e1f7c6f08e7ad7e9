use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use adaptive_connect_four::ai::AdaptiveAgent;
use adaptive_connect_four::config::AppConfig;
use adaptive_connect_four::game::Player;
use adaptive_connect_four::training::{StageConfig, Trainer};

/// Train the adaptive Connect Four agent against fixed-depth opponents.
#[derive(Parser)]
#[command(name = "train", about = "Train the adaptive Connect Four agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the weight file path
    #[arg(long, conflicts_with = "no_persist")]
    weights: Option<PathBuf>,

    /// Train in memory without reading or writing a weight file
    #[arg(long)]
    no_persist: bool,

    /// Override the search depth used while training
    #[arg(long)]
    depth: Option<usize>,

    /// Total games, split across stages in their configured proportions
    #[arg(long)]
    games: Option<usize>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(path) = cli.weights {
        app_config.adaptive.weights_path = Some(path);
    }
    if cli.no_persist {
        app_config.adaptive.weights_path = None;
    }
    if let Some(depth) = cli.depth {
        if depth == 0 {
            bail!("--depth must be at least 1");
        }
        app_config.training.training_depth = depth;
    }
    if let Some(games) = cli.games {
        if games == 0 {
            bail!("--games must be at least 1");
        }
        app_config.training.stages = scale_stages(&app_config.training.stages, games);
    }
    app_config.validate().context("validating configuration")?;

    match &app_config.adaptive.weights_path {
        Some(path) => info!("Weights: {}", path.display()),
        None => info!("Weights: not persisted"),
    }

    let mut agent = AdaptiveAgent::from_config(Player::One, app_config.adaptive.clone());
    let trainer = Trainer::new(app_config.training.clone());
    let report = trainer.train(&mut agent).context("training failed")?;

    println!("-------------------------------------------");
    for stage in &report.stages {
        println!("{stage}");
    }
    println!("-------------------------------------------");
    println!("Final weights:");
    for (feature, value) in agent.weights().iter() {
        println!("  {:<18} {:>10.4}", feature.name(), value);
    }

    Ok(())
}

/// Redistribute `total` games over `stages` in proportion to their configured
/// sizes. Every stage keeps at least one game.
fn scale_stages(stages: &[StageConfig], total: usize) -> Vec<StageConfig> {
    let configured: usize = stages.iter().map(|s| s.games).sum();
    if configured == 0 {
        return stages.to_vec();
    }
    stages
        .iter()
        .map(|stage| {
            let share = (stage.games as f64 * total as f64 / configured as f64).round() as usize;
            StageConfig {
                games: share.max(1),
                opponent: stage.opponent,
            }
        })
        .collect()
}
