//! Game update detection.
//!
//! Decides whether spawn data needs regenerating by comparing the time of the
//! last run (kept in a small timestamp file) with the last time the game was
//! updated (reported by `steamcmd`).

mod steamcmd;
mod timestamp;

pub use steamcmd::{parse_app_info, SteamCmd, DEFAULT_APP_ID};
pub use timestamp::{read_last_run_time, write_last_run_time};

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Default timestamp file name.
pub const TIMESTAMP_FILENAME: &str = "last_run_time.txt";

/// Something that knows when the game last changed.
pub trait UpdateSource {
    fn last_update_time(&self) -> Result<DateTime<Utc>>;
}

/// Result of an update check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The game changed since the last run; the timestamp file was rewritten.
    Regenerate {
        last_run: DateTime<Utc>,
        last_update: DateTime<Utc>,
    },
    /// Nothing changed since the last run.
    UpToDate {
        last_run: DateTime<Utc>,
        last_update: DateTime<Utc>,
    },
}

impl CheckOutcome {
    pub fn needs_regeneration(&self) -> bool {
        matches!(self, CheckOutcome::Regenerate { .. })
    }
}

/// Whether the game was updated after the last run.
pub fn needs_regeneration(last_run: DateTime<Utc>, last_update: DateTime<Utc>) -> bool {
    last_run < last_update
}

/// Compare the timestamp file against `source`, stamping `now` on regeneration.
pub fn check_for_update(
    timestamp_file: &Path,
    source: &dyn UpdateSource,
    now: DateTime<Utc>,
) -> Result<CheckOutcome> {
    let last_run = read_last_run_time(timestamp_file)?;
    let last_update = source.last_update_time()?;

    tracing::debug!(%last_run, %last_update, "comparing update times");

    if needs_regeneration(last_run, last_update) {
        write_last_run_time(timestamp_file, now)?;
        Ok(CheckOutcome::Regenerate {
            last_run,
            last_update,
        })
    } else {
        Ok(CheckOutcome::UpToDate {
            last_run,
            last_update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedSource(DateTime<Utc>);

    impl UpdateSource for FixedSource {
        fn last_update_time(&self) -> Result<DateTime<Utc>> {
            Ok(self.0)
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_needs_regeneration() {
        assert!(needs_regeneration(at(1), at(2)));
        assert!(!needs_regeneration(at(2), at(2)));
        assert!(!needs_regeneration(at(3), at(2)));
    }

    #[test]
    fn test_check_rewrites_timestamp_when_updated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TIMESTAMP_FILENAME);
        write_last_run_time(&path, at(1)).unwrap();

        let outcome = check_for_update(&path, &FixedSource(at(2)), at(5)).unwrap();

        assert!(outcome.needs_regeneration());
        assert_eq!(read_last_run_time(&path).unwrap(), at(5));
    }

    #[test]
    fn test_check_leaves_timestamp_when_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TIMESTAMP_FILENAME);
        write_last_run_time(&path, at(3)).unwrap();

        let outcome = check_for_update(&path, &FixedSource(at(2)), at(5)).unwrap();

        assert_eq!(
            outcome,
            CheckOutcome::UpToDate {
                last_run: at(3),
                last_update: at(2),
            }
        );
        assert_eq!(read_last_run_time(&path).unwrap(), at(3));
    }
}
