//! Wrapper synthesis
//!
//! A wrapper is the single script handed to the engine: harness preamble,
//! optional fixture shim, resolved dependencies in declaration order, then
//! the untouched test body. Later sections may use names defined by earlier
//! ones, never the reverse.

use crate::error::ExecError;
use crate::fixtures::Fixtures;
use crate::resolver::{Resolution, ResourceResolver};
use crate::test_case::TestCase;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Last timestamp handed out, so identities stay strictly increasing
static LAST_MICROS: AtomicU64 = AtomicU64::new(0);

fn next_micros() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);

    let mut last = LAST_MICROS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_MICROS.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Identity of a synthesized wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitId {
    /// Leading hex digits of the SHA-256 of the full source path
    pub digest: String,
    /// Microsecond timestamp, unique within the process
    pub micros: u64,
}

impl UnitId {
    /// Issue a fresh identity for a source path
    pub fn issue(source_path: &Path) -> Self {
        let hash = Sha256::digest(source_path.to_string_lossy().as_bytes());
        let digest = hash
            .iter()
            .take(8)
            .map(|b| format!("{:02x}", b))
            .collect();
        Self {
            digest,
            micros: next_micros(),
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.digest, self.micros)
    }
}

/// Wrapper text ready to be written to disk
#[derive(Debug, Clone)]
pub struct WrapperSource {
    /// Unique identity
    pub id: UnitId,
    /// File name inside the wrapper directory
    pub file_name: String,
    /// Full script text
    pub content: String,
    /// How each declared dependency was resolved, in declaration order
    pub resolutions: Vec<Resolution>,
    /// Whether a fixture shim was injected
    pub has_fixtures: bool,
}

/// Composes wrapper scripts from test cases
#[derive(Debug, Clone)]
pub struct Synthesizer {
    preamble: String,
    resolver: ResourceResolver,
    fixtures: Fixtures,
}

impl Synthesizer {
    /// Create a synthesizer with the built-in fixture table
    pub fn new(preamble: String, resolver: ResourceResolver) -> Self {
        Self {
            preamble,
            resolver,
            fixtures: Fixtures::new(),
        }
    }

    /// Replace the fixture table
    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = fixtures;
        self
    }

    /// Get the preamble text
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Build the wrapper for a test
    pub fn synthesize(&self, test: &TestCase) -> WrapperSource {
        let id = UnitId::issue(&test.path);
        let file_name = format!("wrapper_{}_{}.js", test.name(), id);

        let mut content = String::with_capacity(self.preamble.len() + test.source.len() + 256);
        content.push_str("// WPT harness preamble\n");
        content.push_str(&self.preamble);
        content.push_str("\n\n");

        let fixture_block = self.fixtures.render(test);
        if let Some(block) = &fixture_block {
            content.push_str("// === Fixtures ===\n");
            content.push_str(block);
            content.push('\n');
        }

        let mut resolutions = Vec::with_capacity(test.directives.scripts().len());
        for declared in test.directives.scripts() {
            let resolution = self.resolver.resolve(declared, test.dir());
            content.push_str(&format!("// === Resource: {} ===\n", declared));
            content.push_str(&resolution.text());
            content.push('\n');
            resolutions.push(resolution);
        }

        content.push_str(&format!("// === Test: {} ===\n", test.relative));
        content.push_str(&test.source);
        content.push('\n');

        WrapperSource {
            id,
            file_name,
            content,
            resolutions,
            has_fixtures: fixture_block.is_some(),
        }
    }
}

/// Directory holding wrapper files for the current run
#[derive(Debug, Clone)]
pub struct WrapperStore {
    dir: PathBuf,
}

impl WrapperStore {
    /// Create a store rooted at `dir`
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove stale wrappers left by an earlier run and recreate the directory
    pub fn prepare(&self) -> std::io::Result<()> {
        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir)?;
        }
        std::fs::create_dir_all(&self.dir)
    }

    /// Write a wrapper to disk; the returned guard removes it when dropped
    pub fn write(&self, source: &WrapperSource) -> Result<WrapperUnit, ExecError> {
        let path = self.dir.join(&source.file_name);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, &source.content))
            .map_err(|e| ExecError::WriteUnit {
                path: path.clone(),
                source: e,
            })?;

        Ok(WrapperUnit {
            id: source.id.clone(),
            path,
        })
    }
}

/// A wrapper file on disk, removed when the guard goes out of scope
#[derive(Debug)]
pub struct WrapperUnit {
    id: UnitId,
    path: PathBuf,
}

impl WrapperUnit {
    /// Get the identity
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WrapperUnit {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "could not remove wrapper");
        }
    }
}
