mod commands;
mod surface;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::book::BookArgs;

#[derive(Parser)]
#[command(name = "tour-scheduler")]
#[command(about = "Pick a tour time at Yordi Home Care and save the calendar invite")]
struct Cli {
    /// Config file (defaults to ~/.config/tour-scheduler/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tour times offered on a date
    Slots {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Print the options as JSON
        #[arg(long)]
        json: bool,
    },
    /// Request a tour and save the invite
    Book(BookArgs),
    /// Show the fields of a saved invite
    Inspect {
        /// Path to an .ics file
        file: PathBuf,
    },
    /// Show the config path and effective settings
    Config {
        /// Write a commented config template if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Slots { date, json } => commands::slots::run(&date, json),
        Commands::Book(args) => commands::book::run(args, config_path.as_deref()),
        Commands::Inspect { file } => commands::inspect::run(&file),
        Commands::Config { init } => commands::config::run(config_path.as_deref(), init),
    }
}
