//! Runner configuration

use crate::error::{HarnessError, HarnessResult};
use crate::executor::DEFAULT_TIMEOUT;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default engine location, relative to the invoking directory
pub const DEFAULT_ENGINE: &str = "./target/release/jsrt";

/// Default corpus location
pub const DEFAULT_WPT_DIR: &str = "./wpt";

/// Preamble shipped with the crate
pub const BUNDLED_PREAMBLE: &str = include_str!("../resources/testharness.js");

/// Where the harness preamble comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreambleSource {
    /// The preamble bundled into the binary
    Bundled,
    /// A file read verbatim at startup
    File(PathBuf),
}

/// Settings for one harness run
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Engine executable
    pub engine: PathBuf,
    /// WPT checkout
    pub corpus_root: PathBuf,
    /// Harness preamble
    pub preamble: PreambleSource,
    /// Directory for ephemeral wrapper files
    pub wrapper_dir: PathBuf,
    /// Per-test wall-clock budget
    pub timeout: Duration,
}

impl RunnerConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            engine: PathBuf::from(DEFAULT_ENGINE),
            corpus_root: PathBuf::from(DEFAULT_WPT_DIR),
            preamble: PreambleSource::Bundled,
            wrapper_dir: std::env::temp_dir().join("wpt-harness-units"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the engine executable
    pub fn with_engine<P: Into<PathBuf>>(mut self, engine: P) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the corpus root
    pub fn with_corpus_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.corpus_root = root.into();
        self
    }

    /// Use a preamble file instead of the bundled one
    pub fn with_preamble_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.preamble = PreambleSource::File(path.into());
        self
    }

    /// Set the wrapper directory
    pub fn with_wrapper_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.wrapper_dir = dir.into();
        self
    }

    /// Set the per-test budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pre-run checks: engine and corpus must exist.
    ///
    /// Returns a copy with absolute paths, since the engine runs with the
    /// corpus root as its working directory.
    pub fn validate(&self) -> HarnessResult<Self> {
        if !self.engine.is_file() {
            return Err(HarnessError::EngineNotFound(self.engine.clone()));
        }
        if !self.corpus_root.is_dir() {
            return Err(HarnessError::CorpusNotFound(self.corpus_root.clone()));
        }

        let mut resolved = self.clone();
        resolved.engine = std::fs::canonicalize(&self.engine)?;
        resolved.corpus_root = std::fs::canonicalize(&self.corpus_root)?;
        resolved.wrapper_dir = absolute(&self.wrapper_dir)?;
        if let PreambleSource::File(path) = &self.preamble {
            resolved.preamble = PreambleSource::File(absolute(path)?);
        }
        Ok(resolved)
    }

    /// Load the preamble text
    pub fn load_preamble(&self) -> HarnessResult<String> {
        match &self.preamble {
            PreambleSource::Bundled => Ok(BUNDLED_PREAMBLE.to_string()),
            PreambleSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| HarnessError::PreambleUnreadable {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
