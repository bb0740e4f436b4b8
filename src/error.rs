use thiserror::Error;

/// Unified error type for release-train operations
#[derive(Error, Debug)]
pub enum ReleaseTrainError {
    #[error("Invalid pattern '{0}'. Must be 'dev' or 'rc'.")]
    InvalidPattern(String),

    #[error("Invalid stage '{0}'. Must be 'dev', 'rc' or 'stable'.")]
    InvalidStage(String),

    #[error("Invalid version: '{0}'")]
    InvalidVersion(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("key '{key}' not found in {file}")]
    KeyNotFound { key: String, file: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience type alias for Results in release-train
pub type Result<T> = std::result::Result<T, ReleaseTrainError>;

impl ReleaseTrainError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseTrainError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseTrainError::Manifest(msg.into())
    }

    /// Create a missing-key error for a dotted key lookup
    pub fn key_not_found(key: impl Into<String>, file: impl Into<String>) -> Self {
        ReleaseTrainError::KeyNotFound {
            key: key.into(),
            file: file.into(),
        }
    }

    /// True for errors caused by the caller's request rather than the environment.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            ReleaseTrainError::InvalidPattern(_)
                | ReleaseTrainError::InvalidStage(_)
                | ReleaseTrainError::InvalidVersion(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let err = ReleaseTrainError::InvalidPattern("beta".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid pattern 'beta'. Must be 'dev' or 'rc'."
        );
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseTrainError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.is_invalid_request());
    }

    #[test]
    fn test_key_not_found_display() {
        let err = ReleaseTrainError::key_not_found("project.version", "pyproject.toml");
        assert_eq!(
            err.to_string(),
            "key 'project.version' not found in pyproject.toml"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseTrainError::config("x"), "Configuration error"),
            (ReleaseTrainError::manifest("x"), "Manifest error"),
            (
                ReleaseTrainError::InvalidStage("x".to_string()),
                "Invalid stage",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
