//! Feature filter
//!
//! Decides whether a test can plausibly run outside a browser by scanning its
//! raw source for capability markers the engine does not provide.

use std::path::Path;

/// Substrings that tie a test to a document, window or worker environment.
/// Order matters: the first hit is the one reported.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "document.",
    "window.",
    "WorkerGlobalScope",
    "SharedWorker",
    "Worker(",
    "importScripts",
    "navigator.",
    "location.",
    "XMLHttpRequest",
    "EventTarget",
    "addEventListener",
    "performance.mark",
    "performance.measure",
    "getComputedStyle",
];

/// Marker for tests declared to run only in a window global
const WINDOW_ONLY_MARKER: &str = "global=window";

/// Markers that indicate an alternate global the engine can stand in for
const ALTERNATE_GLOBALS: &[&str] = &["dedicatedworker", "shadowrealm"];

/// Result of the support check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Support {
    /// The test may be executed
    Supported,
    /// The test is rejected with a reason
    Unsupported(String),
}

impl Support {
    /// Check if the test may be executed
    pub fn is_supported(&self) -> bool {
        matches!(self, Support::Supported)
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Support::Supported => None,
            Support::Unsupported(reason) => Some(reason),
        }
    }
}

/// Denylist-driven support check
#[derive(Debug, Clone)]
pub struct FeatureFilter {
    denylist: Vec<String>,
}

impl FeatureFilter {
    /// Create a filter with the default denylist
    pub fn new() -> Self {
        Self::with_denylist(DEFAULT_DENYLIST.iter().copied())
    }

    /// Create a filter with a custom denylist
    pub fn with_denylist<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denylist: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a token to the end of the denylist
    pub fn deny(&mut self, token: &str) {
        self.denylist.push(token.to_string());
    }

    /// Get the denylist in scan order
    pub fn denylist(&self) -> &[String] {
        &self.denylist
    }

    /// Check test source text
    pub fn check_source(&self, source: &str) -> Support {
        if let Some(token) = self.denylist.iter().find(|t| source.contains(t.as_str())) {
            return Support::Unsupported(format!("Uses unsupported feature: {}", token));
        }

        if source.contains(WINDOW_ONLY_MARKER)
            && !ALTERNATE_GLOBALS.iter().any(|g| source.contains(g))
        {
            return Support::Unsupported("Requires window global only".to_string());
        }

        Support::Supported
    }

    /// Check a test file on disk; a read failure is reported as unsupported
    pub fn check_file<P: AsRef<Path>>(&self, path: P) -> Support {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(source) => self.check_source(&source),
            Err(e) => Support::Unsupported(format!("Error reading file: {}", e)),
        }
    }
}

impl Default for FeatureFilter {
    fn default() -> Self {
        Self::new()
    }
}
