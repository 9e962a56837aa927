//! # recede
//!
//! Command-line front end for the closed-loop driver.
//!
//! ```bash
//! # Write the cart-pole swing-up problem artifact
//! recede export --output pendulum.json
//!
//! # Run it in closed loop with the reference backend
//! recede run --problem pendulum.json --steps 100 --output trajectories.json
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `recede=info`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

use commands::{ExportCommand, RunCommand};

/// Closed-loop receding-horizon control driver
#[derive(Parser, Debug)]
#[command(name = "recede")]
#[command(about = "Closed-loop receding-horizon control driver", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the pendulum problem artifact as JSON
    Export {
        #[command(flatten)]
        args: ExportCommand,
    },

    /// Run the closed loop with the reference backend
    Run {
        #[command(flatten)]
        args: RunCommand,
    },
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recede=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export { args } => args.execute(),
        Commands::Run { args } => args.execute(),
    }
}
