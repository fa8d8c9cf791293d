use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by listen-stats.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A numeric argument fell outside its accepted range.
    #[error("Number of top songs must be between {min} and {max} (got {value})")]
    Range {
        value: usize,
        min: usize,
        max: usize,
    },

    /// The configured data directory does not exist.
    #[error("Data directory not found: {0}")]
    NotFound(PathBuf),

    /// A data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not a valid JSON array of play records.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A play timestamp did not match `%Y-%m-%dT%H:%M:%SZ`.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A monthly request was made without an artist name.
    #[error("Please provide an artist name.")]
    MissingArtist,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StatsError {
    /// `true` for malformed files and unparsable timestamps alike.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::TimestampParse(_))
    }
}

/// Convenience alias used throughout the listen-stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_range() {
        let err = StatsError::Range {
            value: 51,
            min: 1,
            max: 50,
        };
        assert_eq!(
            err.to_string(),
            "Number of top songs must be between 1 and 50 (got 51)"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let err = StatsError::NotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Data directory not found: /missing/dir");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StatsError::FileRead {
            path: PathBuf::from("/data/history.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/history.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_parse_names_file() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = StatsError::Parse {
            path: PathBuf::from("/data/broken.json"),
            source: json_err,
        };
        assert!(err.to_string().starts_with("Failed to parse /data/broken.json"));
        assert!(err.is_parse());
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = StatsError::TimestampParse("yesterday".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: yesterday");
        assert!(err.is_parse());
    }

    #[test]
    fn test_error_display_missing_artist() {
        assert_eq!(
            StatsError::MissingArtist.to_string(),
            "Please provide an artist name."
        );
    }

    #[test]
    fn test_non_parse_errors() {
        assert!(!StatsError::NotFound(PathBuf::from("x")).is_parse());
        assert!(!StatsError::MissingArtist.is_parse());
        assert!(!StatsError::Config("bad".into()).is_parse());
    }
}
