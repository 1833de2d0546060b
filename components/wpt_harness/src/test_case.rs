use crate::directives::Directives;
use crate::error::ExecError;
use std::path::{Path, PathBuf};

/// A WPT test file with its source and parsed directives
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Path to the test file on disk
    pub path: PathBuf,
    /// Path relative to the corpus root, `/`-separated
    pub relative: String,
    /// Source code of the test
    pub source: String,
    /// Directives parsed from the header block
    pub directives: Directives,
}

impl TestCase {
    /// Load a test file from disk
    pub fn load<P: AsRef<Path>>(corpus_root: &Path, path: P) -> Result<Self, ExecError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path).map_err(|source| ExecError::ReadTest {
            path: path.clone(),
            source,
        })?;
        Ok(Self::from_source(corpus_root, path, source))
    }

    /// Build a test case from source already in memory
    pub fn from_source(corpus_root: &Path, path: PathBuf, source: String) -> Self {
        let relative = relative_name(corpus_root, &path);
        let directives = Directives::parse(&source);
        Self {
            path,
            relative,
            source,
            directives,
        }
    }

    /// Get the test name (file name without extension)
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.relative)
    }

    /// Directory containing the test
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Corpus-relative, `/`-separated display name for a path
pub fn relative_name(corpus_root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(corpus_root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
