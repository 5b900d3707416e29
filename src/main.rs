use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{Direction, GameConfig, Position};
use grid_snake::logging::init_logging;
use grid_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid-based snake game for the terminal")]
struct Cli {
    /// TOML config file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows (fits the terminal when omitted)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns (fits the terminal when omitted)
    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// File holding the high score
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Starting head cell as ROW,COL
    #[arg(long, value_parser = parse_position)]
    start: Option<Position>,

    /// Starting heading
    #[arg(long, value_enum)]
    heading: Option<Heading>,

    /// Log file
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Disable logging
    #[arg(long)]
    no_log: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Up => Direction::Up,
            Heading::Down => Direction::Down,
            Heading::Left => Direction::Left,
            Heading::Right => Direction::Right,
        }
    }
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column: {e}"))?;
    Ok(Position::new(row, col))
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path).context("Failed to load config")?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.grid_rows = Some(rows);
        }
        if let Some(cols) = self.cols {
            config.grid_cols = Some(cols);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(path) = &self.high_score_file {
            config.high_score_path = path.clone();
        }
        if let Some(start) = self.start {
            config.initial_head = start;
        }
        if let Some(heading) = self.heading {
            config.initial_heading = heading.into();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.no_log {
        init_logging(&cli.log_file)?;
    }

    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
