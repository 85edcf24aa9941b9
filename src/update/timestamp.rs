//! Last-run timestamp file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Result, VentsError};

/// Read the timestamp of the last regeneration.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00.5+00:00`); a timestamp without an
/// offset is taken as UTC.
pub fn read_last_run_time(path: &Path) -> Result<DateTime<Utc>> {
    let content = fs::read_to_string(path).map_err(|e| VentsError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read timestamp file: {}", e),
    })?;

    parse_timestamp(content.trim()).ok_or_else(|| VentsError::Parse {
        message: format!(
            "Invalid timestamp in {}: {:?}",
            path.display(),
            content.trim()
        ),
        help: Some("Expected an ISO-8601 time such as 2024-05-01T12:00:00+00:00".to_string()),
    })
}

/// Overwrite the timestamp file with `time`, followed by a newline.
pub fn write_last_run_time(path: &Path, time: DateTime<Utc>) -> Result<()> {
    fs::write(path, format!("{}\n", time.to_rfc3339())).map_err(|e| VentsError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write timestamp file: {}", e),
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(s) {
        return Some(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
