//! Dependency resolution
//!
//! Declared scripts are looked up under two roots: the test's own directory
//! and the corpus root. A miss never aborts the run; the wrapper receives a
//! placeholder comment instead.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of resolving one declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Content was read from `path`
    Loaded { path: PathBuf, content: String },
    /// No candidate path exists
    Missing { declared: String },
    /// A candidate exists but could not be read
    Unreadable { declared: String, error: String },
}

impl Resolution {
    /// Check if content was loaded
    pub fn is_loaded(&self) -> bool {
        matches!(self, Resolution::Loaded { .. })
    }

    /// Text to inline: the file content or a placeholder comment
    pub fn text(&self) -> String {
        match self {
            Resolution::Loaded { content, .. } => content.clone(),
            Resolution::Missing { declared } => {
                format!("// Resource file not found: {}\n", declared)
            }
            Resolution::Unreadable { declared, error } => {
                format!("// Error loading resource: {} - {}\n", declared, error)
            }
        }
    }
}

/// Resolves `// META: script=` paths against the corpus
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    corpus_root: PathBuf,
}

impl ResourceResolver {
    /// Create a resolver for a corpus root
    pub fn new<P: Into<PathBuf>>(corpus_root: P) -> Self {
        Self {
            corpus_root: corpus_root.into(),
        }
    }

    /// Get the corpus root
    pub fn corpus_root(&self) -> &Path {
        &self.corpus_root
    }

    /// Candidate paths in lookup order.
    ///
    /// A root-absolute declaration (`/resources/x.js`) is tried under the
    /// corpus root first, anything else under the test directory first; the
    /// other interpretation is the fallback.
    pub fn candidates(&self, declared: &str, test_dir: &Path) -> [PathBuf; 2] {
        match declared.strip_prefix('/') {
            Some(stripped) => [self.corpus_root.join(stripped), test_dir.join(stripped)],
            None => [test_dir.join(declared), self.corpus_root.join(declared)],
        }
    }

    /// Resolve a declared dependency for a test living in `test_dir`
    pub fn resolve(&self, declared: &str, test_dir: &Path) -> Resolution {
        let mut read_error = None;

        for candidate in self.candidates(declared, test_dir) {
            if !candidate.is_file() {
                continue;
            }
            match std::fs::read_to_string(&candidate) {
                Ok(content) => {
                    debug!(resource = declared, path = %candidate.display(), "loaded resource");
                    return Resolution::Loaded {
                        path: candidate,
                        content,
                    };
                }
                Err(e) => {
                    warn!(resource = declared, path = %candidate.display(), error = %e, "could not read resource");
                    read_error.get_or_insert(e.to_string());
                }
            }
        }

        match read_error {
            Some(error) => Resolution::Unreadable {
                declared: declared.to_string(),
                error,
            },
            None => {
                warn!(resource = declared, test_dir = %test_dir.display(), "resource file not found");
                Resolution::Missing {
                    declared: declared.to_string(),
                }
            }
        }
    }
}
