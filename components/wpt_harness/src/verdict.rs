use serde::{Deserialize, Serialize};
use std::fmt;

/// What a pass or fail verdict was decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Non-zero exit status
    ExitStatus,
    /// Failed count from a harness summary line
    SummaryLine,
    /// Presence or absence of a per-case failure marker
    FailureMarker,
    /// Clean exit without any summary line
    PermissiveDefault,
}

/// Outcome label used in reports and JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Skip,
    Timeout,
    Error,
}

impl Status {
    /// Progress symbol for console output
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Pass => "✓",
            Status::Fail | Status::Error => "✗",
            Status::Skip => "○",
            Status::Timeout => "⚠",
        }
    }

    /// Uppercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Skip => "SKIP",
            Status::Timeout => "TIMEOUT",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running a single test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Test passed
    Pass(Basis),
    /// Test failed; captured output tells why
    Fail(Basis),
    /// Test was not run, with reason
    Skip(String),
    /// Engine exceeded its budget, with reason
    Timeout(String),
    /// Engine could not be invoked, with reason
    Error(String),
}

impl Verdict {
    /// Get the status label
    pub fn status(&self) -> Status {
        match self {
            Verdict::Pass(_) => Status::Pass,
            Verdict::Fail(_) => Status::Fail,
            Verdict::Skip(_) => Status::Skip,
            Verdict::Timeout(_) => Status::Timeout,
            Verdict::Error(_) => Status::Error,
        }
    }

    /// Reason text for skips, timeouts and errors
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Skip(r) | Verdict::Timeout(r) | Verdict::Error(r) => Some(r),
            Verdict::Pass(_) | Verdict::Fail(_) => None,
        }
    }

    /// Classification basis for passes and failures
    pub fn basis(&self) -> Option<Basis> {
        match self {
            Verdict::Pass(b) | Verdict::Fail(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the result is a pass
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass(_))
    }

    /// Check if the result is a failure
    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail(_))
    }

    /// Check if the result is a skip
    pub fn is_skip(&self) -> bool {
        matches!(self, Verdict::Skip(_))
    }

    /// Check if the result is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Verdict::Timeout(_))
    }

    /// Check if the result is an invocation error
    pub fn is_error(&self) -> bool {
        matches!(self, Verdict::Error(_))
    }

    /// Check if the verdict counts toward the failed total
    pub fn counts_as_failure(&self) -> bool {
        matches!(self, Verdict::Fail(_) | Verdict::Timeout(_) | Verdict::Error(_))
    }
}
