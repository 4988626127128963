use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use toroid_snake::game::{CollisionPolicy, Difficulty, GameConfig};
use toroid_snake::leaderboard::FileLeaderboard;
use toroid_snake::modes::HumanMode;
use toroid_snake::modes::human::viewport_cells;

#[derive(Parser)]
#[command(name = "toroid_snake")]
#[command(version, about = "Wrap-around Snake in the terminal")]
struct Cli {
    /// Speed tier, also picks the leaderboard
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Fixed number of rows (fitted to the terminal when omitted)
    #[arg(long, requires = "cols")]
    rows: Option<usize>,

    /// Fixed number of columns (fitted to the terminal when omitted)
    #[arg(long, requires = "rows")]
    cols: Option<usize>,

    /// Name recorded on the leaderboard
    #[arg(long, default_value = "Anonymous")]
    name: String,

    /// Leaderboard file
    #[arg(long, default_value = "leaderboard.json")]
    leaderboard: PathBuf,

    /// JSON game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// End the game before drawing the losing move
    #[arg(long)]
    predictive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let (Some(rows), Some(cols)) = (cli.rows, cli.cols) {
        config.rows = Some(rows);
        config.cols = Some(cols);
    }
    if cli.predictive {
        config.collision_policy = CollisionPolicy::Predictive;
    }

    let (width, height) = crossterm::terminal::size().context("Failed to read terminal size")?;
    let (view_cols, view_rows) = viewport_cells(width, height);
    let grid = config
        .grid_for_viewport(view_cols, view_rows)
        .context("Invalid grid size")?;

    info!("starting: {:?}", config);

    let leaderboard = FileLeaderboard::open(&cli.leaderboard);
    let mut human_mode = HumanMode::new(config, grid, Box::new(leaderboard), cli.name);
    human_mode.run().await?;

    info!("bye");
    Ok(())
}
