// pwscfrs/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use pwscfrs::cli::{generate_deck, inspect_deck, normalize_deck};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pwscfrs")]
#[command(about = "Generate and normalize PWscf input decks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an input deck from a YAML job file
    Generate {
        /// Job file
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        /// Output deck (defaults to the job's `output`, else stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Rewrite an input deck in canonical form
    Normalize {
        input: PathBuf,
        /// Output deck (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show the sections of an input deck
    Inspect {
        input: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn entrypoint() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, output } => generate_deck(&config, output.as_deref()),
        Commands::Normalize { input, output } => normalize_deck(&input, output.as_deref()),
        Commands::Inspect { input, json } => inspect_deck(&input, json),
    }
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
