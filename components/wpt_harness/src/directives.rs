//! META directive parsing
//!
//! WPT tests declare dependencies in a header block of `// META: key=value`
//! comments. Only the first [`HEADER_LINES`] lines are inspected.

use std::collections::BTreeMap;

/// Number of leading lines scanned for directives
pub const HEADER_LINES: usize = 20;

/// Comment prefix that introduces a directive
pub const META_PREFIX: &str = "// META:";

/// Directive kinds the harness understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectiveKind {
    /// A script to inline ahead of the test body
    Script,
    /// Human-readable test title
    Title,
    /// Timeout hint (e.g. `long`)
    Timeout,
}

impl DirectiveKind {
    /// All recognized kinds
    pub const ALL: [DirectiveKind; 3] = [
        DirectiveKind::Script,
        DirectiveKind::Title,
        DirectiveKind::Timeout,
    ];

    /// Map a directive key to its kind; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "script" => Some(DirectiveKind::Script),
            "title" => Some(DirectiveKind::Title),
            "timeout" => Some(DirectiveKind::Timeout),
            _ => None,
        }
    }

    /// The key used in source text
    pub fn key(&self) -> &'static str {
        match self {
            DirectiveKind::Script => "script",
            DirectiveKind::Title => "title",
            DirectiveKind::Timeout => "timeout",
        }
    }
}

/// Directives declared by a test, values kept in encounter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    values: BTreeMap<DirectiveKind, Vec<String>>,
}

impl Directives {
    /// Parse the header block of a test source
    pub fn parse(source: &str) -> Self {
        let mut directives = Self::default();

        for line in source.lines().take(HEADER_LINES) {
            let line = line.trim();
            let Some(meta) = line.strip_prefix(META_PREFIX) else {
                continue;
            };
            let Some((key, value)) = meta.trim().split_once('=') else {
                continue;
            };
            if let Some(kind) = DirectiveKind::from_key(key.trim()) {
                directives
                    .values
                    .entry(kind)
                    .or_default()
                    .push(value.trim().to_string());
            }
        }

        directives
    }

    /// Values declared for a kind; empty when none were declared
    pub fn get(&self, kind: DirectiveKind) -> &[String] {
        self.values.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declared dependency scripts
    pub fn scripts(&self) -> &[String] {
        self.get(DirectiveKind::Script)
    }

    /// First declared title
    pub fn title(&self) -> Option<&str> {
        self.get(DirectiveKind::Title).first().map(String::as_str)
    }

    /// First declared timeout hint
    pub fn timeout(&self) -> Option<&str> {
        self.get(DirectiveKind::Timeout).first().map(String::as_str)
    }

    /// Check if no directive was found
    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }
}

impl Default for Directives {
    fn default() -> Self {
        let values = DirectiveKind::ALL
            .iter()
            .map(|kind| (*kind, Vec::new()))
            .collect();
        Self { values }
    }
}
