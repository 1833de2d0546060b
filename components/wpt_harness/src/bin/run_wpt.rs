//! WPT Runner
//!
//! Command-line entry point: runs WinterCG categories of the Web Platform
//! Tests against a JavaScript engine executable and prints a summary.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wpt_harness::categories::{self, CATEGORIES};
use wpt_harness::{
    Classifier, Cli, HarnessError, HarnessResult, RunEvent, RunSummary, Status, TestRecord,
    WptRunner,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_categories {
        println!("Available test categories:");
        for (name, patterns) in CATEGORIES {
            println!("  {}: {:?}", name, patterns);
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(summary) if summary.failed > 0 => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                HarnessError::EngineNotFound(_) => {
                    eprintln!("Please build the engine first or pass --engine");
                }
                HarnessError::CorpusNotFound(_) => {
                    eprintln!("Please clone WPT (https://github.com/web-platform-tests/wpt) or pass --wpt-dir");
                }
                _ => {}
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> HarnessResult<RunSummary> {
    // Unknown names are rejected before any test runs
    for name in &cli.categories {
        if categories::patterns(name).is_none() {
            return Err(HarnessError::UnknownCategory(name.clone()));
        }
    }

    let runner = WptRunner::new(cli.config())?;
    let config = runner.config();

    let selected = cli.selected_categories();

    if !selected.is_empty() {
        println!("Running WPT tests for categories: {}", selected.join(", "));
    }
    if !cli.tests.is_empty() {
        println!("Running WPT test files: {}", cli.tests.join(", "));
    }
    println!("Using engine: {}", config.engine.display());
    println!("WPT directory: {}", config.corpus_root.display());
    println!();

    let classifier = runner.classifier();
    let mut summary = if selected.is_empty() {
        RunSummary::default()
    } else {
        runner.run_categories(&selected, |event| on_event(event, classifier))?
    };
    if !cli.tests.is_empty() {
        let adhoc = runner.run_paths("selected", &cli.tests, |event| on_event(event, classifier))?;
        for record in adhoc.tests {
            summary.record(record);
        }
    }

    println!("{}", summary.report().render());

    if let Some(path) = &cli.output {
        std::fs::write(path, summary.to_json()?)?;
        println!("\nResults written to {}", path.display());
    }

    Ok(summary)
}

fn on_event(event: RunEvent<'_>, classifier: &Classifier) {
    match event {
        RunEvent::CategoryStarted(name) => println!("=== Running {} tests ===", name),
        RunEvent::UnknownCategory(name) => println!("Warning: Unknown category '{}'", name),
        RunEvent::NoTests(name) => println!("No test files found for category '{}'", name),
        RunEvent::TestFinished(record) => print_record(record, classifier),
        RunEvent::CategoryFinished(_) => println!(),
    }
}

fn print_record(record: &TestRecord, classifier: &Classifier) {
    println!("  {} {} - {}", record.status.symbol(), record.test, record.status);

    if let Some(reason) = &record.reason {
        println!("    {}", reason);
        return;
    }
    if !matches!(record.status, Status::Fail | Status::Error | Status::Timeout) {
        return;
    }

    match (&record.stderr, &record.stdout) {
        (Some(stderr), _) if !stderr.is_empty() => {
            let excerpt: String = stderr.chars().take(200).collect();
            println!("    Error: {}...", excerpt);
        }
        (_, Some(stdout)) => {
            if let Some(line) = classifier.first_failure_line(stdout) {
                println!("    {}", line);
            }
        }
        _ => {}
    }
}
