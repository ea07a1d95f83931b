// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "sensorview")]
#[command(about = "Sample front-end for the sensor frame conversion library")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a synthetic depth frame and query a point of interest
    Depth {
        /// Frame width in pixels
        #[arg(long, default_value = "512")]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value = "424")]
        height: u32,

        /// Output 16-bit grayscale instead of 8-bit RGBA
        #[arg(long)]
        gray16: bool,
    },

    /// Colorize a synthetic body-index frame with an audio highlight
    BodyIndex,

    /// Record a synthetic sine sweep to a waveform file
    Record {
        /// Output file path
        #[arg(short, long, default_value = "capture.wav")]
        output: PathBuf,

        /// Recording length in seconds
        #[arg(short, long, default_value = "2")]
        seconds: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=sensorview=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Depth {
            width,
            height,
            gray16,
        } => cli::demo_depth(width, height, gray16),
        Commands::BodyIndex => cli::demo_body_index(),
        Commands::Record { output, seconds } => cli::record(output, seconds),
    }
}
