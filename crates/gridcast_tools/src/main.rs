//! Gridcast - Development Tools

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gridcast_core::level::{Level, LevelConfig, SPAWN_FACING};
use gridcast_tools::ascii::{render_maze, Frame};
use gridcast_tools::config::resolve_level_config;
use gridcast_tools::error::Result;
use gridcast_tools::validate::validate_path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gridcast-tools")]
#[command(about = "Development tools for the Gridcast raycasting core")]
struct Cli {
    /// RON level config (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the config's maze seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated maze
    Maze,
    /// Cast a single ray and print what it hits
    Cast {
        /// Origin x (defaults to the spawn point)
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
        /// Origin y (defaults to the spawn point)
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,
        /// Facing angle in radians
        #[arg(long, default_value_t = SPAWN_FACING, allow_hyphen_values = true)]
        facing: f64,
        /// Ray offset from the facing angle in radians
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        relative: f64,
    },
    /// Render a first-person ASCII frame
    Frame {
        /// Origin x (defaults to the spawn point)
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
        /// Origin y (defaults to the spawn point)
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,
        /// Facing angle in radians
        #[arg(long, default_value_t = SPAWN_FACING, allow_hyphen_values = true)]
        facing: f64,
        /// Screen columns
        #[arg(long, default_value_t = 32)]
        columns: u16,
        /// Screen rows
        #[arg(long, default_value_t = 48)]
        rows: u16,
    },
    /// Validate RON level configs
    Validate {
        /// Config file, or directory of `.ron` files
        #[arg(default_value = "levels")]
        path: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Maze => {
            let level = build_level(cli.config.as_deref(), cli.seed)?;
            print!("{}", render_maze(level.maze()));
        }
        Commands::Cast {
            x,
            y,
            facing,
            relative,
        } => {
            let level = build_level(cli.config.as_deref(), cli.seed)?;
            let (x, y) = origin(&level, x, y);
            let hit = level.cast(x, y, facing, relative);
            println!(
                "distance {:.4} material {} at ({:.4}, {:.4}) {:?}{}",
                hit.distance,
                hit.material.code(),
                hit.point_x,
                hit.point_y,
                hit.orientation,
                if hit.out_of_bounds { " out of bounds" } else { "" }
            );
        }
        Commands::Frame {
            x,
            y,
            facing,
            columns,
            rows,
        } => {
            let level = build_level(cli.config.as_deref(), cli.seed)?;
            let (x, y) = origin(&level, x, y);
            let frame = Frame::render(&level, x, y, facing, columns, rows)?;
            print!("{frame}");
        }
        Commands::Validate { path } => {
            tracing::info!("Validating level configs in: {}", path.display());
            let checked = validate_path(&path)?;
            tracing::info!(files = checked.len(), "Validation passed");
        }
    }
    Ok(())
}

fn build_level(config: Option<&Path>, seed: Option<u64>) -> Result<Level> {
    let mut config: LevelConfig = resolve_level_config(config)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(Level::generate(config)?)
}

fn origin(level: &Level, x: Option<f64>, y: Option<f64>) -> (f64, f64) {
    let (spawn_x, spawn_y) = level.spawn_point();
    (x.unwrap_or(spawn_x), y.unwrap_or(spawn_y))
}
