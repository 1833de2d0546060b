use crate::executor::ExecutionResult;
use crate::verdict::{Basis, Status, Verdict};
use serde::{Deserialize, Serialize};

/// Per-test record, as written to the JSON results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Corpus-relative test path
    pub test: String,
    /// Outcome label
    pub status: Status,
    /// Reason for skips, timeouts and errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// What a pass or fail was decided on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<Basis>,
    /// Captured stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    /// Captured stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// Engine exit code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returncode: Option<i32>,
}

impl TestRecord {
    /// Record a verdict that never reached the engine, or had no output
    pub fn new(test: &str, verdict: &Verdict) -> Self {
        Self {
            test: test.to_string(),
            status: verdict.status(),
            reason: verdict.reason().map(str::to_string),
            basis: verdict.basis(),
            stdout: None,
            stderr: None,
            returncode: None,
        }
    }

    /// Record a verdict together with the output it was classified from
    pub fn with_output(test: &str, verdict: &Verdict, output: ExecutionResult) -> Self {
        Self {
            stdout: Some(output.stdout),
            stderr: Some(output.stderr),
            returncode: output.exit_code,
            ..Self::new(test, verdict)
        }
    }

    /// Check if the record counts toward the failed total
    pub fn counts_as_failure(&self) -> bool {
        matches!(self.status, Status::Fail | Status::Timeout | Status::Error)
    }

    /// Check if a pass rests only on the permissive default
    pub fn is_unconfirmed_pass(&self) -> bool {
        self.status == Status::Pass && self.basis == Some(Basis::PermissiveDefault)
    }
}

/// Run-level accumulator; every test adds exactly one record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of passing tests
    pub passed: usize,
    /// Number of failing tests, including timeouts and errors
    pub failed: usize,
    /// Number of skipped tests
    pub skipped: usize,
    /// All records in execution order
    pub tests: Vec<TestRecord>,
}

impl RunSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a test record
    pub fn record(&mut self, record: TestRecord) {
        match record.status {
            Status::Pass => self.passed += 1,
            Status::Skip => self.skipped += 1,
            Status::Fail | Status::Timeout | Status::Error => self.failed += 1,
        }
        self.tests.push(record);
    }

    /// Number of recorded tests
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Build the aggregated report
    pub fn report(&self) -> Report {
        Report::from_records(&self.tests)
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Summary statistics over a sequence of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Total number of tests
    pub total: usize,
    /// Number of tests that passed
    pub passed: usize,
    /// Number of tests that failed (timeouts and errors included)
    pub failed: usize,
    /// Number of tests that were skipped
    pub skipped: usize,
    /// Number of tests that timed out
    pub timeouts: usize,
    /// Number of tests the engine could not be run for
    pub errors: usize,
    /// Passes that rest on the permissive default
    pub unconfirmed: Vec<String>,
}

impl Report {
    /// Aggregate records
    pub fn from_records(records: &[TestRecord]) -> Self {
        let mut report = Self::default();
        for record in records {
            report.total += 1;
            match record.status {
                Status::Pass => report.passed += 1,
                Status::Fail => report.failed += 1,
                Status::Skip => report.skipped += 1,
                Status::Timeout => {
                    report.failed += 1;
                    report.timeouts += 1;
                }
                Status::Error => {
                    report.failed += 1;
                    report.errors += 1;
                }
            }
            if record.is_unconfirmed_pass() {
                report.unconfirmed.push(record.test.clone());
            }
        }
        report
    }

    /// Pass rate as a percentage; `None` when no tests ran
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.passed as f64 / self.total as f64 * 100.0)
        }
    }

    /// Check if nothing failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Render the human-readable summary block
    pub fn render(&self) -> String {
        let mut output = format!(
            "=== Test Summary ===\n\
             Total tests: {}\n\
             Passed: {}\n\
             Failed: {}\n\
             Skipped: {}",
            self.total, self.passed, self.failed, self.skipped
        );

        if self.timeouts > 0 || self.errors > 0 {
            output.push_str(&format!(
                "\n  (of failed: {} timed out, {} errors)",
                self.timeouts, self.errors
            ));
        }

        if let Some(rate) = self.pass_rate() {
            output.push_str(&format!("\nPass rate: {:.1}%", rate));
        }

        if !self.unconfirmed.is_empty() {
            output.push_str(&format!(
                "\n\nUnconfirmed passes (clean exit, no summary line): {}",
                self.unconfirmed.len()
            ));
            for test in &self.unconfirmed {
                output.push_str(&format!("\n  - {}", test));
            }
        }

        output
    }
}
