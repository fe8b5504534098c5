//! wordbpe CLI - learn and apply word-level BPE merge lists.
//!
//! This is the main entry point for the `wordbpe` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ApplybpeCommand, GetvocabCommand, LearnbpeCommand};

#[derive(Parser)]
#[command(name = "wordbpe")]
#[command(about = "Learn and apply word-level BPE merge lists", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the word vocabulary from one or two text files
    Getvocab(GetvocabCommand),
    /// Learn BPE merge rules from one or two text files
    Learnbpe(LearnbpeCommand),
    /// Apply BPE merge rules to a text file
    Applybpe(ApplybpeCommand),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Getvocab(cmd) => commands::getvocab::run(cmd)?,
        Commands::Learnbpe(cmd) => commands::learnbpe::run(cmd)?,
        Commands::Applybpe(cmd) => commands::applybpe::run(cmd)?,
    }

    Ok(())
}
