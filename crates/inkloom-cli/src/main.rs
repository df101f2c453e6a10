//! CLI frontend for the InkLoom story engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "inkloom",
    about = "InkLoom: play and check branching stories",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a story and report structural problems
    Check {
        /// Story document or package (.json)
        story: PathBuf,
    },

    /// Play a story interactively on the terminal
    Play {
        /// Story document or package (.json)
        story: PathBuf,

        /// Save file: resumed from on start, rewritten after every step
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Settings file (JSON, app settings format)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Drop {typewriter} markers from the text
        #[arg(long)]
        strip_typewriter: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { story } => commands::check::run(&story),
        Commands::Play {
            story,
            save,
            settings,
            seed,
            strip_typewriter,
        } => commands::play::run(
            &story,
            save.as_deref(),
            settings.as_deref(),
            seed,
            strip_typewriter,
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
