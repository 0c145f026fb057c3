//! tablex CLI
//!
//! Command-line interface for tablex

use clap::{Parser, Subcommand, ValueEnum};
use tablex_core::logging_facility::{init, Profile};

mod commands;
mod config;
mod snapshot;

#[derive(Debug, Parser)]
#[command(name = "tablex")]
#[command(about = "tablex - incremental edit plans for grouped lists", long_about = None)]
struct Cli {
    /// Emit structured logs to stderr
    #[arg(long, value_enum, global = true)]
    log: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the edit plan between two snapshot files
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log {
        Some(LogFormat::Pretty) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
