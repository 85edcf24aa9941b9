pub mod check;
pub mod completions;
pub mod dump;
pub mod spawns;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// vents - Spawn point extractor for .vents map entity dumps
#[derive(Parser, Debug)]
#[command(name = "vents")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./vents.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract CT and T spawn positions as JSON
    Spawns(spawns::SpawnsArgs),

    /// Print every parsed block as JSON
    Dump(dump::DumpArgs),

    /// Check whether the game updated since the last run
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the explicit config file, or discover one in the working directory.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::discover(Path::new(".")),
    }
}
