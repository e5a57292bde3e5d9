//! pressfx CLI
//!
//! Replay scripted press gestures against in-memory views and inspect easing
//! curves.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pressfx::PressConfig;
use pressfx_animation::{CubicEasing, EasingCurve};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "pressfx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "pressfx press-effect toolbox", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted gesture and print every frame
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Press config file (TOML); overrides the scenario's [config] table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame length in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f32,
    },

    /// Print the eased progress of a timing curve
    Curve {
        #[arg(long, default_value = "0.33")]
        x1: f32,
        #[arg(long, default_value = "0.0")]
        y1: f32,
        #[arg(long, default_value = "0.67")]
        x2: f32,
        #[arg(long, default_value = "1.0")]
        y2: f32,

        /// Number of evenly spaced samples, including both ends
        #[arg(short, long, default_value = "11")]
        samples: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            frame_ms,
        } => cmd_simulate(&scenario, config.as_deref(), frame_ms),

        Commands::Curve {
            x1,
            y1,
            x2,
            y2,
            samples,
        } => cmd_curve(EasingCurve::new(x1, y1, x2, y2), samples),
    }
}

fn cmd_simulate(path: &Path, config_path: Option<&Path>, frame_ms: f32) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let config = match config_path {
        Some(config_path) => PressConfig::load(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?,
        None => scenario.config.clone().unwrap_or_default(),
    };

    info!(
        "Simulating {} ({:?} variant, {} views, {}ms frames)",
        path.display(),
        config.variant,
        scenario.views.len(),
        frame_ms
    );

    let report = scenario.run(config, frame_ms)?;
    info!(
        "Done: scale {:.3}, alpha {:?}",
        report.final_scale, report.final_alpha
    );
    Ok(())
}

fn cmd_curve(curve: EasingCurve, samples: usize) -> Result<()> {
    if !curve.is_valid() {
        bail!("Invalid curve {:?}: control points must lie in [0, 1]", curve.to_array());
    }
    if samples < 2 {
        bail!("Need at least 2 samples, got {}", samples);
    }

    info!("Curve {:?}", curve.to_array());
    let mut easing = CubicEasing::new(curve);
    for i in 0..samples {
        let input = i as f32 / (samples - 1) as f32;
        println!("{:.4}  {:.4}", input, easing.interpolate(input));
    }
    Ok(())
}
