//! Development tasks for the bundle engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{ReadStore, ValidateContent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Development tasks for the bundle engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for bundle content and stores", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load config, items and bundles and report every problem
    ValidateContent(ValidateContent),

    /// Read and inspect a persisted bundle store
    ReadStore(ReadStore),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BUNDLE_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::ValidateContent(cmd) => cmd.execute(),
        Command::ReadStore(cmd) => cmd.execute(),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings by default).
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
