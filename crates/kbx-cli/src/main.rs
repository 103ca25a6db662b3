//! # kbx-cli
//!
//! Command-line interface for the KBX ledger.
//!
//! ## Usage
//!
//! ```bash
//! # Inspect a genesis ledger
//! kbx genesis --genesis genesis.json
//! kbx genesis --owner 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266
//!
//! # Replay a script of operations and check expected outcomes
//! kbx replay --genesis genesis.json --script ops.json
//!
//! # Query state after an optional replay
//! kbx query --genesis genesis.json --script ops.json balance 0x...
//! kbx query --owner 0x... supply
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod error;
mod output;
mod script;

/// KBX ledger CLI
#[derive(Parser, Debug)]
#[command(name = "kbx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the genesis ledger and print its summary
    Genesis(commands::genesis::GenesisCommand),
    /// Replay a script of operations
    Replay(commands::replay::ReplayCommand),
    /// Query ledger state
    Query(commands::query::QueryCommand),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match &cli.command {
        Commands::Genesis(cmd) => cmd.execute(cli.json),
        Commands::Replay(cmd) => cmd.execute(cli.json),
        Commands::Query(cmd) => cmd.execute(cli.json),
    };

    if let Err(e) = result {
        if cli.json {
            println!("{}", e.to_json());
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
