use miette::Diagnostic;
use thiserror::Error;

/// Main error type for vents operations
#[derive(Error, Diagnostic, Debug)]
pub enum VentsError {
    #[error("IO error: {0}")]
    #[diagnostic(code(vents::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(vents::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(vents::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(vents::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed spawn record in block {block} (line {line}): {reason}")]
    #[diagnostic(
        code(vents::spawn),
        help("Spawn entities need an `origin` of three floats, e.g. `origin 1.0 2.0 3.0`")
    )]
    MalformedSpawnRecord {
        block: u64,
        line: usize,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    #[diagnostic(code(vents::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("Update check failed: {message}")]
    #[diagnostic(code(vents::update))]
    Update {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, VentsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_are_serialization_errors() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();

        let err = VentsError::from(json_err);

        assert!(matches!(err, VentsError::Serialize(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("vents::serialize".to_string())
        );
    }
}
