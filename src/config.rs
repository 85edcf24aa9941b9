//! Project configuration (vents.yaml).
//!
//! Every field is optional; command-line flags override what is set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VentsError};
use crate::parser::{ParseOptions, RepeatedMarker};
use crate::update::{SteamCmd, DEFAULT_APP_ID, TIMESTAMP_FILENAME};

/// Config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "vents.yaml";

/// Settings loaded from vents.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where to write spawn JSON. Stdout if unset.
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// How a repeated `====<id>====` marker is handled.
    pub repeated_markers: RepeatedMarker,

    /// Last-run timestamp file used by `vents check`.
    pub timestamp_file: PathBuf,

    /// steamcmd executable.
    pub steamcmd: PathBuf,

    /// Steam app id to query.
    pub app_id: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: None,
            pretty: true,
            repeated_markers: RepeatedMarker::default(),
            timestamp_file: PathBuf::from(TIMESTAMP_FILENAME),
            steamcmd: PathBuf::from("steamcmd"),
            app_id: DEFAULT_APP_ID,
        }
    }
}

impl Config {
    /// Load config from a vents.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VentsError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| VentsError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `dir/vents.yaml` if it exists, otherwise use defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_repeated_markers(self.repeated_markers)
    }

    pub fn steamcmd(&self) -> SteamCmd {
        SteamCmd::new(self.steamcmd.clone(), self.app_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("output: spawns.json").unwrap();

        assert_eq!(config.output, Some(PathBuf::from("spawns.json")));
        assert!(config.pretty);
        assert_eq!(config.repeated_markers, RepeatedMarker::Merge);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
output: out/spawns.json
pretty: false
repeated_markers: reset
timestamp_file: state/last_run.txt
steamcmd: /opt/steamcmd/steamcmd.sh
app_id: 740
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.output, Some(PathBuf::from("out/spawns.json")));
        assert!(!config.pretty);
        assert_eq!(config.repeated_markers, RepeatedMarker::Reset);
        assert_eq!(config.timestamp_file, PathBuf::from("state/last_run.txt"));
        assert_eq!(config.steamcmd().program, PathBuf::from("/opt/steamcmd/steamcmd.sh"));
        assert_eq!(config.steamcmd().app_id, 740);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_invalid_policy() {
        let result = Config::parse("repeated_markers: sometimes");
        assert!(matches!(result, Err(VentsError::Config { .. })));
    }

    #[test]
    fn test_discover_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_discover_with_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "app_id: 1\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();

        assert_eq!(config.app_id, 1);
        assert_eq!(
            config.parse_options().repeated_markers,
            RepeatedMarker::Merge
        );
    }
}
