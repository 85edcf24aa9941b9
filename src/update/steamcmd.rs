//! `steamcmd` app info lookup.

use std::path::PathBuf;
use std::process::Command;

use chrono::{DateTime, Utc};

use crate::error::{Result, VentsError};
use crate::parser::parse_keyvalues;

use super::UpdateSource;

/// Counter-Strike 2 app id.
pub const DEFAULT_APP_ID: u32 = 730;

/// Queries `steamcmd` for the last time an app was updated.
#[derive(Debug, Clone)]
pub struct SteamCmd {
    /// Path to (or name of) the steamcmd executable
    pub program: PathBuf,
    pub app_id: u32,
}

impl Default for SteamCmd {
    fn default() -> Self {
        Self {
            program: PathBuf::from("steamcmd"),
            app_id: DEFAULT_APP_ID,
        }
    }
}

impl SteamCmd {
    pub fn new(program: impl Into<PathBuf>, app_id: u32) -> Self {
        Self {
            program: program.into(),
            app_id,
        }
    }

    /// Run `steamcmd +app_info_print` and return its stdout.
    pub fn app_info(&self) -> Result<String> {
        tracing::debug!(program = %self.program.display(), app_id = self.app_id, "running steamcmd");

        let output = Command::new(&self.program)
            .args(["+login", "anonymous", "+app_info_print"])
            .arg(self.app_id.to_string())
            .args(["+logoff", "+quit"])
            .output()
            .map_err(|e| VentsError::Update {
                message: format!("Failed to run {}: {}", self.program.display(), e),
                help: Some("Install steamcmd or pass --steamcmd <PATH>".to_string()),
            })?;

        if !output.status.success() {
            return Err(VentsError::Update {
                message: format!("{} exited with {}", self.program.display(), output.status),
                help: None,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl UpdateSource for SteamCmd {
    fn last_update_time(&self) -> Result<DateTime<Utc>> {
        let output = self.app_info()?;
        parse_app_info(&output, self.app_id)
    }
}

/// Extract `<app>.common.timeline_marker_updated` from `+app_info_print` output.
///
/// The output wraps the KeyValues tree in console chatter, so everything
/// before the app's root key and after the last `}` is dropped, and any
/// remaining line that is neither a brace nor a quoted entry is blanked.
pub fn parse_app_info(output: &str, app_id: u32) -> Result<DateTime<Utc>> {
    let id = app_id.to_string();
    let start = output
        .find(&format!("\"{}\"", id))
        .or_else(|| output.find(&id))
        .ok_or_else(|| update_error(format!("App {} not found in steamcmd output", id)))?;
    let end = output[start..]
        .rfind('}')
        .map(|i| start + i + 1)
        .ok_or_else(|| update_error("No app info block in steamcmd output".to_string()))?;

    let cleaned: Vec<&str> = output[start..end]
        .lines()
        .map(|line| if is_keyvalues_line(line) { line } else { "" })
        .collect();

    let root = parse_keyvalues(&cleaned.join("\n"))?;

    let raw = root
        .get_path(&[id.as_str(), "common", "timeline_marker_updated"])
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            update_error(format!(
                "Missing {}.common.timeline_marker_updated in app info",
                id
            ))
        })?;

    let seconds: i64 = raw
        .trim()
        .parse()
        .map_err(|_| update_error(format!("Invalid timeline_marker_updated: {:?}", raw)))?;

    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| update_error(format!("Timestamp out of range: {}", seconds)))
}

/// Brace lines and lines holding at least one quoted token.
fn is_keyvalues_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('}') || line.matches('"').count() >= 2
}

fn update_error(message: String) -> VentsError {
    VentsError::Update {
        message,
        help: None,
    }
}
