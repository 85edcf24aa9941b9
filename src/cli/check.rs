//! Check command implementation.
//!
//! Compares the last-run timestamp with the game's last update reported by
//! steamcmd. Exits 0 (and stamps the current time) when the spawn data needs
//! regenerating, 2 when nothing changed.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::update::{check_for_update, CheckOutcome, SteamCmd};

/// Exit code when the game has not updated since the last run.
pub const EXIT_UP_TO_DATE: i32 = 2;

/// Check whether the game updated since the last run
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Timestamp file holding the last run time
    #[arg(long)]
    pub timestamp_file: Option<PathBuf>,

    /// steamcmd executable
    #[arg(long)]
    pub steamcmd: Option<PathBuf>,

    /// Steam app id to query
    #[arg(long)]
    pub app_id: Option<u32>,
}

pub fn run(args: CheckArgs, config: &Config, printer: &Printer) -> Result<CheckOutcome> {
    let timestamp_file = args
        .timestamp_file
        .unwrap_or_else(|| config.timestamp_file.clone());
    let steamcmd = SteamCmd::new(
        args.steamcmd.unwrap_or_else(|| config.steamcmd.clone()),
        args.app_id.unwrap_or(config.app_id),
    );

    printer.status("Checking", &format!("app {}", steamcmd.app_id));
    let outcome = check_for_update(&timestamp_file, &steamcmd, Utc::now())?;

    match outcome {
        CheckOutcome::Regenerate { last_update, .. } => {
            printer.status("Updated", &format!("game changed at {}", last_update.to_rfc3339()));
            printer.status("Stamped", &display_path(&timestamp_file));
        }
        CheckOutcome::UpToDate { last_run, .. } => {
            printer.info("Fresh", &format!("no update since {}", last_run.to_rfc3339()));
        }
    }

    Ok(outcome)
}
