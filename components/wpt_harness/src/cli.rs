//! Command-line interface definition

use crate::categories;
use crate::config::{RunnerConfig, DEFAULT_ENGINE, DEFAULT_WPT_DIR};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Run Web Platform Tests for the WinterCG minimum common API against a JavaScript engine
#[derive(Parser, Debug)]
#[command(name = "run_wpt")]
#[command(version)]
pub struct Cli {
    /// Path to the engine executable
    #[arg(long, default_value = DEFAULT_ENGINE)]
    pub engine: PathBuf,

    /// Path to the WPT checkout
    #[arg(long = "wpt-dir", default_value = DEFAULT_WPT_DIR)]
    pub wpt_dir: PathBuf,

    /// Test category to run (repeatable; default: all)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Corpus-relative test file to run (repeatable)
    #[arg(long = "test")]
    pub tests: Vec<String>,

    /// List available test categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Per-test timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Harness preamble file (default: bundled)
    #[arg(long)]
    pub preamble: Option<PathBuf>,

    /// Write results as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the runner configuration from parsed arguments
    pub fn config(&self) -> RunnerConfig {
        let config = RunnerConfig::new()
            .with_engine(&self.engine)
            .with_corpus_root(&self.wpt_dir)
            .with_timeout(Duration::from_secs(self.timeout));

        match &self.preamble {
            Some(path) => config.with_preamble_file(path),
            None => config,
        }
    }

    /// Categories to run: every category when nothing is selected, none
    /// when only individual test files were named
    pub fn selected_categories(&self) -> Vec<String> {
        if self.categories.is_empty() && self.tests.is_empty() {
            categories::names().into_iter().map(String::from).collect()
        } else {
            self.categories.clone()
        }
    }
}
