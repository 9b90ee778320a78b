//! One case per vector line, and the report for a whole run.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::codec::IdnaCodec;
use crate::config::HarnessConfig;
use crate::corpus::{read_corpus, VectorRecord};
use crate::error::HarnessError;
use crate::runner::{CaseOutcome, CaseReport, CaseRunner, CaseStatus};
use crate::skip_list::SkipList;

/// A single vector line, identified for reporting.
#[derive(Debug, Clone)]
pub struct VectorCase {
    suite: Arc<str>,
    corpus: Arc<str>,
    record: VectorRecord,
}

impl VectorCase {
    /// Stable id: `<suite>.<line>`.
    pub fn id(&self) -> String {
        format!("{}.{}", self.suite, self.record.line)
    }

    /// The raw line as it appears in the corpus, before escape resolution.
    pub fn description(&self) -> String {
        format!("{} line {}: \"{}\"", self.corpus, self.record.line, self.record.joined())
    }

    pub fn line(&self) -> usize {
        self.record.line
    }

    pub fn record(&self) -> &VectorRecord {
        &self.record
    }

    pub fn run<C: IdnaCodec + ?Sized>(&self, runner: &CaseRunner<'_, C>) -> CaseResult {
        CaseResult {
            id: self.id(),
            description: self.description(),
            report: runner.run_record(&self.record),
        }
    }
}

/// A case together with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub id: String,
    pub description: String,
    pub report: CaseReport,
}

impl CaseResult {
    #[inline]
    pub fn outcome(&self) -> CaseOutcome {
        self.report.outcome()
    }
}

/// A loaded corpus plus the skip list it runs with.
#[derive(Debug, Clone)]
pub struct Suite {
    name: Arc<str>,
    cases: Vec<VectorCase>,
    skip_list: SkipList,
}

impl Suite {
    /// Build a suite from already-parsed records.
    pub fn from_records(
        name: &str,
        corpus_name: &str,
        records: Vec<VectorRecord>,
        skip_list: SkipList,
    ) -> Self {
        let suite: Arc<str> = Arc::from(name);
        let corpus: Arc<str> = Arc::from(corpus_name);
        let cases = records
            .into_iter()
            .map(|record| VectorCase {
                suite: Arc::clone(&suite),
                corpus: Arc::clone(&corpus),
                record,
            })
            .collect();
        Self {
            name: suite,
            cases,
            skip_list,
        }
    }

    /// Read the corpus named by `config` and build the suite.
    pub fn load(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let skip_list = config.skip_list()?;
        let records = read_corpus(&config.corpus)?;
        info!(
            corpus = %config.corpus.display(),
            cases = records.len(),
            skip_entries = skip_list.len(),
            "loaded vector corpus"
        );
        Ok(Self::from_records(&config.suite, &config.corpus_name(), records, skip_list))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[VectorCase] {
        &self.cases
    }

    pub fn skip_list(&self) -> &SkipList {
        &self.skip_list
    }

    /// Run every case in order on the current thread.
    pub fn run<C: IdnaCodec + ?Sized>(&self, codec: &C) -> SuiteReport {
        let runner = CaseRunner::new(codec, &self.skip_list);
        let results = self.cases.iter().map(|case| case.run(&runner)).collect();
        self.finish(results)
    }

    /// Run cases on the rayon pool. Results keep corpus order.
    pub fn run_parallel<C: IdnaCodec + Sync + ?Sized>(&self, codec: &C) -> SuiteReport {
        let runner = CaseRunner::new(codec, &self.skip_list);
        let results = self.cases.par_iter().map(|case| case.run(&runner)).collect();
        self.finish(results)
    }

    /// Run with the mode `config` asks for.
    pub fn run_configured<C: IdnaCodec + Sync + ?Sized>(
        &self,
        codec: &C,
        config: &HarnessConfig,
    ) -> SuiteReport {
        if config.parallel {
            self.run_parallel(codec)
        } else {
            self.run(codec)
        }
    }

    fn finish(&self, results: Vec<CaseResult>) -> SuiteReport {
        let report = SuiteReport::new(self.name.to_string(), results);
        info!(
            suite = %report.suite,
            cases = report.case_count(),
            passed = report.pass_count,
            excluded = report.excluded_count,
            skipped = report.skip_count,
            failed = report.fail_count,
            "suite finished"
        );
        report
    }
}

/// Aggregate of a suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub suite: String,
    /// Passing cases, excluded ones included.
    pub pass_count: usize,
    /// Cases that passed only because the skip list excluded them.
    pub excluded_count: usize,
    pub skip_count: usize,
    pub fail_count: usize,
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn new(suite: String, results: Vec<CaseResult>) -> Self {
        let mut report = Self {
            suite,
            pass_count: 0,
            excluded_count: 0,
            skip_count: 0,
            fail_count: 0,
            results: Vec::new(),
        };
        for result in &results {
            match result.outcome() {
                CaseOutcome::Pass => report.pass_count += 1,
                CaseOutcome::Skip => report.skip_count += 1,
                CaseOutcome::Fail => report.fail_count += 1,
            }
            if matches!(result.report.status, CaseStatus::Excluded(_)) {
                report.excluded_count += 1;
            }
        }
        report.results = results;
        report
    }

    pub fn case_count(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.fail_count == 0
    }

    /// Failed cases with their messages, formatted for a test failure.
    pub fn failures(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.outcome() == CaseOutcome::Fail)
            .map(|r| format!("{} ({}): {}", r.id, r.description, r.report.failures().join("; ")))
            .collect()
    }

    /// Look up a case by the line it came from.
    pub fn by_line(&self, line: usize) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.report.line == line)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} cases, {} passed ({} excluded), {} skipped, {} failed",
            self.suite,
            self.case_count(),
            self.pass_count,
            self.excluded_count,
            self.skip_count,
            self.fail_count
        )
    }
}
