use thiserror::Error;

/// Unified error type for git-autover operations
#[derive(Error, Debug)]
pub enum AutoverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Version calculation failed: {0}")]
    VersionCalculation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-autover
pub type Result<T> = std::result::Result<T, AutoverError>;

impl AutoverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutoverError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        AutoverError::Tag(msg.into())
    }

    /// Create a version-calculation error with context
    pub fn calculation(msg: impl Into<String>) -> Self {
        AutoverError::VersionCalculation(msg.into())
    }
}
