//! Spawns command implementation.
//!
//! Parses a `.vents` file and writes the CT/T spawn positions as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::{Result, VentsError};
use crate::extract::spawns_from_path;
use crate::output::{display_path, plural, Printer};
use crate::parser::RepeatedMarker;
use crate::types::SpawnSet;

/// Extract CT and T spawn positions as JSON
#[derive(Args, Debug)]
pub struct SpawnsArgs {
    /// Input .vents file
    pub file: PathBuf,

    /// Output JSON file (default: stdout, or `output` from vents.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Start a block over when its marker repeats, instead of merging
    #[arg(long)]
    pub reset_repeated: bool,
}

pub fn run(args: SpawnsArgs, config: &Config, printer: &Printer) -> Result<()> {
    let mut options = config.parse_options();
    if args.reset_repeated {
        options = options.with_repeated_markers(RepeatedMarker::Reset);
    }

    printer.status("Parsing", &display_path(&args.file));
    let spawns = spawns_from_path(&args.file, &options)?;

    printer.status(
        "Extracted",
        &format!(
            "{} CT, {} T",
            plural(spawns.ct.len(), "spawn", "spawns"),
            plural(spawns.t.len(), "spawn", "spawns"),
        ),
    );
    if spawns.is_empty() {
        printer.warning("Warning", "no spawn entities found");
    }

    let pretty = config.pretty && !args.compact;
    let output = args.output.as_ref().or(config.output.as_ref());

    match output {
        Some(path) => {
            write_spawns(path, &spawns, pretty)?;
            printer.status("Wrote", &printer.cyan(&display_path(path)));
        }
        None => println!("{}", spawns.to_json(pretty)?),
    }

    Ok(())
}

/// Write spawn JSON to `path`, creating parent directories as needed.
pub fn write_spawns(path: &Path, spawns: &SpawnSet, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| VentsError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let mut json = spawns.to_json(pretty)?;
    json.push('\n');

    fs::write(path, json).map_err(|e| VentsError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write output: {}", e),
    })
}
