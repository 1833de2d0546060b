//! Web Platform Tests Harness
//!
//! Runs an unmodified WPT checkout against a standalone JavaScript engine
//! executable. Each test is wrapped together with a harness preamble and its
//! declared dependencies into one script, run under a time budget, and its
//! output classified as PASS, FAIL, SKIP, TIMEOUT or ERROR.

pub mod categories;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod directives;
pub mod error;
pub mod executor;
pub mod filter;
pub mod fixtures;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod test_case;
pub mod verdict;
pub mod wrapper;

pub use classifier::{Classifier, FailedCount, SummaryPattern};
pub use cli::Cli;
pub use config::{PreambleSource, RunnerConfig};
pub use directives::{DirectiveKind, Directives};
pub use error::{ExecError, HarnessError, HarnessResult};
pub use executor::{Engine, Execution, ExecutionResult};
pub use filter::{FeatureFilter, Support};
pub use fixtures::{FixtureSpec, Fixtures};
pub use report::{Report, RunSummary, TestRecord};
pub use resolver::{Resolution, ResourceResolver};
pub use runner::{RunEvent, WptRunner};
pub use test_case::TestCase;
pub use verdict::{Basis, Status, Verdict};
pub use wrapper::{Synthesizer, UnitId, WrapperSource, WrapperStore, WrapperUnit};
