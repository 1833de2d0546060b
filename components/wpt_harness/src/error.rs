//! Error types for the WPT harness

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a run before any test is processed
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The target engine executable does not exist
    #[error("engine executable not found at {}", .0.display())]
    EngineNotFound(PathBuf),

    /// The test corpus root does not exist
    #[error("WPT directory not found at {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// The harness preamble could not be loaded
    #[error("could not read harness preamble {}: {source}", path.display())]
    PreambleUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The wrapper directory could not be reset
    #[error("could not prepare wrapper directory {}: {source}", path.display())]
    WrapperStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A category name with no entry in the category table
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Result serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures confined to a single test; each one becomes an ERROR verdict
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("could not read test {}: {source}", path.display())]
    ReadTest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write wrapper {}: {source}", path.display())]
    WriteUnit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn {}: {source}", engine.display())]
    Spawn {
        engine: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for engine: {0}")]
    Wait(#[source] std::io::Error),
}

/// Result type for pre-run operations
pub type HarnessResult<T> = Result<T, HarnessError>;
