//! Headless command-line driver for Masquerade.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mq_simulation::Difficulty;

#[derive(Parser)]
#[command(
    name = "mq",
    about = "Masquerade: find the hidden guest before your reputation runs out",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game with the built-in autoplayer and print what happened
    Simulate {
        /// Difficulty: easy, medium, hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// RNG seed for a reproducible game
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Let the autoplayer peek at true roles when forced to guess
        #[arg(long)]
        cheat: bool,

        /// Show every guest's secret at the end
        #[arg(short, long)]
        reveal: bool,

        /// Show the full event log
        #[arg(short, long)]
        verbose: bool,

        /// Print the event log as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Catalog file to use instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// List the roles in the catalog
    Roles {
        /// Catalog file to use instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Show the manor's rooms and how they connect
    Rooms {
        /// Catalog file to use instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Write the built-in catalog as JSON, as a starting point for custom ones
    Catalog {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            difficulty,
            seed,
            cheat,
            reveal,
            verbose,
            json,
            catalog,
        } => commands::simulate::run(
            catalog.as_deref(),
            commands::simulate::Options {
                difficulty,
                seed,
                cheat,
                reveal,
                verbose,
                json,
            },
        ),
        Commands::Roles { catalog } => commands::roles::run(catalog.as_deref()),
        Commands::Rooms { catalog } => commands::rooms::run(catalog.as_deref()),
        Commands::Catalog { output } => commands::catalog::run(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
