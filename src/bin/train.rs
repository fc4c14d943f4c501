use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;

use tictac_zero::ai::AgentKind;
use tictac_zero::config::AppConfig;
use tictac_zero::game::Side;
use tictac_zero::training::{Trainer, TrainerConfig};

/// Run a batch of tic-tac-toe self-play games.
#[derive(Parser)]
#[command(name = "train", about = "Tic-tac-toe self-play training")]
struct Cli {
    /// Agent playing Cross (moves first)
    #[arg(long, value_enum, default_value = "brain")]
    cross: AgentKind,

    /// Agent playing Circle
    #[arg(long, value_enum, default_value = "brain")]
    circle: AgentKind,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override the brain exploration rate
    #[arg(long)]
    exploration: Option<f64>,

    /// Seed for reproducible agent choices
    #[arg(long)]
    seed: Option<u64>,

    /// Log every finished board
    #[arg(long)]
    print_result: bool,

    /// Print a config file with all default values and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    Logger::try_with_env_or_str("info")
        .context("configuring logger")?
        .start()
        .context("starting logger")?;

    if cli.dump_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        app_config.training.num_games = games;
    }
    if let Some(rate) = cli.exploration {
        app_config.brain.exploration_rate = rate;
    }
    if cli.print_result {
        app_config.training.print_result = true;
    }
    app_config.validate().context("validating overrides")?;

    let mut cross = cli
        .cross
        .build(Side::Cross, &app_config.brain, cli.seed);
    let mut circle = cli
        .circle
        .build(Side::Circle, &app_config.brain, cli.seed.map(|s| s.wrapping_add(1)));

    let trainer_config: TrainerConfig = app_config.training.clone();
    let trainer = match cli.seed {
        Some(seed) => Trainer::with_seed(trainer_config, seed.wrapping_add(2)),
        None => Trainer::new(trainer_config),
    };
    let metrics = trainer
        .train(cross.as_mut(), circle.as_mut())
        .context("self-play failed")?;

    let n = metrics.total_episodes();
    println!("-------------------------------------------");
    println!("Games played: {}", n);
    println!("Cross wins:   {:.1}%", metrics.overall_win_rate(Side::Cross) * 100.0);
    println!("Circle wins:  {:.1}%", metrics.overall_win_rate(Side::Circle) * 100.0);
    println!("Draws:        {:.1}%", metrics.overall_draw_rate() * 100.0);

    let summary = trainer
        .evaluate(cross.as_mut())
        .context("final evaluation failed")?;
    println!(
        "Final eval {} vs Random: {:.1}% win rate",
        cross.name(),
        summary.win_rate() * 100.0
    );

    Ok(())
}
