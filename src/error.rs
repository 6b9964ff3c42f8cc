//! Error types for ccomp-lit

use thiserror::Error;

/// Result type alias for ccomp-lit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ccomp-lit operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WalkDir error
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// The suite cannot start: compiler or test root is missing
    #[error("{message}")]
    Config { message: String },

    /// The shell for a RUN step could not be started
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Create a spawn error for the given shell command
    pub fn spawn_error(command: impl Into<String>, source: std::io::Error) -> Self {
        Error::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Whether this error must stop the suite before any test runs
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}
