//! ## steadytick-cli
//! **Command-line front-end**
//!
//! - `run`: real-time host loop on the monotonic clock, until Ctrl-C
//! - `simulate`: virtual-clock run with a seeded stall model, printing a digest
//! - `replay`: plays a YAML scenario and verifies its digest

use clap::Parser;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run(args).await,
        Commands::Simulate(args) => commands::simulate(args),
        Commands::Replay(args) => commands::replay(args),
    }
}
