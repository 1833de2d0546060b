//! Unit tests for run summaries and reports

use wpt_harness::{Basis, ExecutionResult, RunSummary, Status, TestRecord, Verdict};

fn summary_of(verdicts: &[Verdict]) -> RunSummary {
    let mut summary = RunSummary::new();
    for (i, verdict) in verdicts.iter().enumerate() {
        summary.record(TestRecord::new(&format!("t/{}.any.js", i), verdict));
    }
    summary
}

#[test]
fn test_new_summary() {
    let summary = RunSummary::new();
    assert_eq!(summary.passed, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);
    assert!(summary.tests.is_empty());
    assert_eq!(summary.total(), 0);
}

#[test]
fn test_timeouts_and_errors_count_as_failed() {
    let summary = summary_of(&[
        Verdict::Pass(Basis::SummaryLine),
        Verdict::Fail(Basis::ExitStatus),
        Verdict::Skip("Uses unsupported feature: document.".to_string()),
        Verdict::Timeout("Test timed out after 30 seconds".to_string()),
        Verdict::Error("failed to spawn".to_string()),
    ]);

    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.total(), summary.tests.len());
}

#[test]
fn test_records_keep_order() {
    let summary = summary_of(&[
        Verdict::Skip("a".to_string()),
        Verdict::Pass(Basis::SummaryLine),
    ]);
    assert_eq!(summary.tests[0].test, "t/0.any.js");
    assert_eq!(summary.tests[0].status, Status::Skip);
    assert_eq!(summary.tests[1].status, Status::Pass);
}

#[test]
fn test_record_reason_only_for_skip_timeout_error() {
    let pass = TestRecord::new("a.js", &Verdict::Pass(Basis::SummaryLine));
    assert!(pass.reason.is_none());
    assert_eq!(pass.basis, Some(Basis::SummaryLine));

    let timeout = TestRecord::new("a.js", &Verdict::Timeout("slow".to_string()));
    assert_eq!(timeout.reason.as_deref(), Some("slow"));
    assert!(timeout.basis.is_none());
}

#[test]
fn test_record_with_output() {
    let output = ExecutionResult {
        stdout: "Total: 1, Passed: 0, Failed: 1\n".to_string(),
        stderr: "warn".to_string(),
        exit_code: Some(0),
    };
    let record = TestRecord::with_output("a.js", &Verdict::Fail(Basis::SummaryLine), output);
    assert_eq!(record.status, Status::Fail);
    assert_eq!(record.returncode, Some(0));
    assert_eq!(record.stderr.as_deref(), Some("warn"));
    assert!(record.counts_as_failure());
}

#[test]
fn test_pass_rate_undefined_when_empty() {
    let report = RunSummary::new().report();
    assert_eq!(report.total, 0);
    assert_eq!(report.pass_rate(), None);
    assert!(!report.render().contains("Pass rate"));
}

#[test]
fn test_pass_rate_includes_skips_in_denominator() {
    let report = summary_of(&[
        Verdict::Pass(Basis::SummaryLine),
        Verdict::Skip("x".to_string()),
        Verdict::Pass(Basis::SummaryLine),
        Verdict::Fail(Basis::SummaryLine),
    ])
    .report();
    assert_eq!(report.pass_rate(), Some(50.0));
    assert!(report.render().contains("Pass rate: 50.0%"));
}

#[test]
fn test_report_breakdown() {
    let report = summary_of(&[
        Verdict::Timeout("t".to_string()),
        Verdict::Error("e".to_string()),
        Verdict::Fail(Basis::ExitStatus),
    ])
    .report();
    assert_eq!(report.failed, 3);
    assert_eq!(report.timeouts, 1);
    assert_eq!(report.errors, 1);
    assert!(!report.is_success());
    assert!(report.render().contains("(of failed: 1 timed out, 1 errors)"));
}

#[test]
fn test_unconfirmed_passes_flagged() {
    let report = summary_of(&[
        Verdict::Pass(Basis::PermissiveDefault),
        Verdict::Pass(Basis::SummaryLine),
    ])
    .report();
    assert_eq!(report.unconfirmed, vec!["t/0.any.js".to_string()]);
    let rendered = report.render();
    assert!(rendered.contains("Unconfirmed passes (clean exit, no summary line): 1"));
    assert!(rendered.contains("  - t/0.any.js"));
}

#[test]
fn test_render_header() {
    let report = summary_of(&[Verdict::Pass(Basis::SummaryLine)]).report();
    let rendered = report.render();
    assert!(rendered.starts_with("=== Test Summary ==="));
    assert!(rendered.contains("Total tests: 1"));
    assert!(rendered.contains("Passed: 1"));
    assert!(rendered.contains("Pass rate: 100.0%"));
}

#[test]
fn test_json_shape() {
    let summary = summary_of(&[
        Verdict::Skip("Requires window global only".to_string()),
        Verdict::Pass(Basis::SummaryLine),
    ]);
    let json = summary.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["passed"], 1);
    assert_eq!(value["skipped"], 1);
    assert_eq!(value["tests"][0]["status"], "SKIP");
    assert_eq!(value["tests"][0]["reason"], "Requires window global only");
    assert!(value["tests"][1].get("reason").is_none());
    assert_eq!(value["tests"][1]["basis"], "summary_line");
}

#[test]
fn test_json_round_trip() {
    let summary = summary_of(&[Verdict::Error("boom".to_string())]);
    let restored = RunSummary::from_json(&summary.to_json().unwrap()).unwrap();
    assert_eq!(restored, summary);
}
