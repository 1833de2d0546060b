//! Test pipeline: filter, synthesize, execute, classify, record

use crate::categories;
use crate::classifier::Classifier;
use crate::config::RunnerConfig;
use crate::error::{ExecError, HarnessError, HarnessResult};
use crate::executor::{Engine, Execution};
use crate::filter::{FeatureFilter, Support};
use crate::fixtures::Fixtures;
use crate::report::{RunSummary, TestRecord};
use crate::resolver::ResourceResolver;
use crate::test_case::{relative_name, TestCase};
use crate::verdict::{Basis, Verdict};
use crate::wrapper::{Synthesizer, WrapperStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Progress notifications emitted while a run advances
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// A category is about to run
    CategoryStarted(&'a str),
    /// A category name has no table entry; it is skipped
    UnknownCategory(&'a str),
    /// No test files matched the category's patterns
    NoTests(&'a str),
    /// A test finished
    TestFinished(&'a TestRecord),
    /// A category finished
    CategoryFinished(&'a str),
}

/// Runs WPT tests against an engine executable
pub struct WptRunner {
    config: RunnerConfig,
    filter: FeatureFilter,
    synthesizer: Synthesizer,
    store: WrapperStore,
    engine: Engine,
    classifier: Classifier,
}

impl WptRunner {
    /// Validate the configuration and build the pipeline.
    ///
    /// Fails before any test is touched when the engine, corpus or preamble
    /// is unavailable.
    pub fn new(config: RunnerConfig) -> HarnessResult<Self> {
        let config = config.validate()?;
        let preamble = config.load_preamble()?;

        let resolver = ResourceResolver::new(&config.corpus_root);
        let engine = Engine::new(&config.engine, &config.corpus_root).with_timeout(config.timeout);

        Ok(Self {
            filter: FeatureFilter::new(),
            synthesizer: Synthesizer::new(preamble, resolver),
            store: WrapperStore::new(&config.wrapper_dir),
            engine,
            classifier: Classifier::new(),
            config,
        })
    }

    /// Replace the feature filter
    pub fn with_filter(mut self, filter: FeatureFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the classifier
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the fixture table
    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.synthesizer = self.synthesizer.with_fixtures(fixtures);
        self
    }

    /// Get the validated configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Get the classifier
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Clear wrappers left over from an earlier, possibly crashed, run
    pub fn prepare(&self) -> HarnessResult<()> {
        self.store.prepare().map_err(|source| HarnessError::WrapperStore {
            path: self.store.dir().to_path_buf(),
            source,
        })
    }

    /// Run the named categories in order and return the accumulated summary
    pub fn run_categories<S, F>(&self, names: &[S], mut observer: F) -> HarnessResult<RunSummary>
    where
        S: AsRef<str>,
        F: FnMut(RunEvent<'_>),
    {
        self.prepare()?;
        let mut summary = RunSummary::new();

        for name in names {
            let name = name.as_ref();
            let Some(patterns) = categories::patterns(name) else {
                warn!(category = name, "unknown category");
                observer(RunEvent::UnknownCategory(name));
                continue;
            };
            let tests = categories::discover(&self.config.corpus_root, patterns);
            self.run_group(name, &tests, &mut summary, &mut observer);
        }

        Ok(summary)
    }

    /// Run explicit corpus-relative test paths as one group
    pub fn run_paths<S, F>(&self, label: &str, paths: &[S], mut observer: F) -> HarnessResult<RunSummary>
    where
        S: AsRef<str>,
        F: FnMut(RunEvent<'_>),
    {
        self.prepare()?;
        let mut summary = RunSummary::new();
        let tests = categories::discover(&self.config.corpus_root, paths);
        self.run_group(label, &tests, &mut summary, &mut observer);
        Ok(summary)
    }

    /// Run one group of test files, adding a record per file to `summary`
    pub fn run_group<F>(&self, label: &str, tests: &[PathBuf], summary: &mut RunSummary, observer: &mut F)
    where
        F: FnMut(RunEvent<'_>),
    {
        if tests.is_empty() {
            observer(RunEvent::NoTests(label));
            return;
        }

        observer(RunEvent::CategoryStarted(label));
        for path in tests {
            let record = self.run_test(path);
            observer(RunEvent::TestFinished(&record));
            summary.record(record);
        }
        observer(RunEvent::CategoryFinished(label));
    }

    /// Run a single test file; always yields exactly one record
    pub fn run_test(&self, path: &Path) -> TestRecord {
        let relative = relative_name(&self.config.corpus_root, path);
        info!(test = %relative, "running test");

        let test = match TestCase::load(&self.config.corpus_root, path) {
            Ok(test) => test,
            Err(ExecError::ReadTest { source, .. }) => {
                let verdict = Verdict::Skip(format!("Error reading file: {}", source));
                return TestRecord::new(&relative, &verdict);
            }
            Err(e) => return TestRecord::new(&relative, &Verdict::Error(e.to_string())),
        };

        if let Support::Unsupported(reason) = self.filter.check_source(&test.source) {
            debug!(test = %relative, reason = %reason, "skipping");
            return TestRecord::new(&relative, &Verdict::Skip(reason));
        }

        if let Some(title) = test.directives.title() {
            debug!(test = %relative, title, "test title");
        }

        let source = self.synthesizer.synthesize(&test);
        let unit = match self.store.write(&source) {
            Ok(unit) => unit,
            Err(e) => return TestRecord::new(&relative, &Verdict::Error(e.to_string())),
        };
        debug!(test = %relative, unit = %unit.id(), "wrapper written");

        match self.engine.run(unit) {
            Ok(Execution::Completed(output)) => {
                let verdict = self.classifier.classify(&output);
                if verdict == Verdict::Pass(Basis::PermissiveDefault) {
                    warn!(test = %relative, "passed on clean exit without a summary line");
                }
                TestRecord::with_output(&relative, &verdict, output)
            }
            Ok(Execution::TimedOut(budget)) => {
                let reason = format!("Test timed out after {} seconds", budget.as_secs_f64());
                TestRecord::new(&relative, &Verdict::Timeout(reason))
            }
            Err(e) => TestRecord::new(&relative, &Verdict::Error(e.to_string())),
        }
    }
}
