//! Outcome classification
//!
//! Maps captured engine output onto a verdict. Rules, first match wins:
//!
//! 1. Non-zero exit (or death by signal) is a failure, whatever stdout says.
//! 2. A recognized summary line decides by its failed count. If that count
//!    does not parse, any per-case failure marker in stdout means failure.
//! 3. A clean exit with no summary line passes. This is a permissive default,
//!    so such passes carry [`Basis::PermissiveDefault`] for the reporter to flag.

use crate::executor::ExecutionResult;
use crate::verdict::{Basis, Verdict};
use regex::Regex;

/// Per-case failure markers printed by the harness preamble
pub const DEFAULT_FAILURE_MARKERS: &[&str] = &["❌"];

/// How a summary pattern yields the failed count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedCount {
    /// Read from the named capture group `failed`
    Captured,
    /// The line itself states there were no failures
    Zero,
}

/// A recognizer for one harness summary line format
#[derive(Debug, Clone)]
pub struct SummaryPattern {
    /// Short name for diagnostics
    pub name: &'static str,
    /// Line pattern
    pub regex: Regex,
    /// How the failed count is obtained
    pub failed: FailedCount,
}

impl SummaryPattern {
    /// Build a pattern; `Captured` patterns must define a `failed` group
    pub fn new(name: &'static str, pattern: &str, failed: FailedCount) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            failed,
        })
    }
}

/// Result of matching a summary line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Summary {
    Count(u64),
    Unparsable,
}

/// Table-driven output classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: Vec<SummaryPattern>,
    markers: Vec<String>,
}

impl Classifier {
    /// Create a classifier with the built-in pattern tables
    pub fn new() -> Self {
        Self {
            patterns: default_patterns(),
            markers: DEFAULT_FAILURE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Add a summary recognizer, tried after the existing ones
    pub fn add_pattern(&mut self, pattern: SummaryPattern) {
        self.patterns.push(pattern);
    }

    /// Add a per-case failure marker
    pub fn add_marker(&mut self, marker: &str) {
        self.markers.push(marker.to_string());
    }

    /// Classify a completed run
    pub fn classify(&self, result: &ExecutionResult) -> Verdict {
        if !result.exited_cleanly() {
            return Verdict::Fail(Basis::ExitStatus);
        }

        match self.find_summary(&result.stdout) {
            Some(Summary::Count(0)) => Verdict::Pass(Basis::SummaryLine),
            Some(Summary::Count(_)) => Verdict::Fail(Basis::SummaryLine),
            Some(Summary::Unparsable) => {
                if self.has_failure_marker(&result.stdout) {
                    Verdict::Fail(Basis::FailureMarker)
                } else {
                    Verdict::Pass(Basis::FailureMarker)
                }
            }
            None => Verdict::Pass(Basis::PermissiveDefault),
        }
    }

    /// Check stdout for any per-case failure marker
    pub fn has_failure_marker(&self, stdout: &str) -> bool {
        self.markers.iter().any(|m| stdout.contains(m.as_str()))
    }

    /// First stdout line carrying a failure marker
    pub fn first_failure_line<'a>(&self, stdout: &'a str) -> Option<&'a str> {
        stdout
            .lines()
            .find(|line| !line.trim().is_empty() && self.has_failure_marker(line))
    }

    /// Scan stdout top to bottom for the first recognized summary line
    fn find_summary(&self, stdout: &str) -> Option<Summary> {
        for line in stdout.lines() {
            for pattern in &self.patterns {
                let Some(caps) = pattern.regex.captures(line) else {
                    continue;
                };
                return Some(match pattern.failed {
                    FailedCount::Zero => Summary::Count(0),
                    FailedCount::Captured => caps
                        .name("failed")
                        .and_then(|m| m.as_str().parse::<u64>().ok())
                        .map(Summary::Count)
                        .unwrap_or(Summary::Unparsable),
                });
            }
        }
        None
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn default_patterns() -> Vec<SummaryPattern> {
    let table: &[(&'static str, &str, FailedCount)] = &[
        (
            "totals",
            r"Total:\s*\S+,\s*Passed:\s*\S+,\s*Failed:\s*(?P<failed>[^\s,]+)",
            FailedCount::Captured,
        ),
        ("no-failures", r"^\s*No failures\b", FailedCount::Zero),
    ];

    table
        .iter()
        .filter_map(|(name, pattern, failed)| SummaryPattern::new(*name, pattern, *failed).ok())
        .collect()
}
