//! Scripted codec and scenario runner

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::common::{ErrorKind, Expected, ExpectedOutcome, Response, Scenario, ScriptedResponses};
use uts46_conformance::corpus::{parse_line, VectorRecord};
use uts46_conformance::{
    CaseOutcome, CaseReport, CaseRunner, Check, CodecError, DecodeOptions, EncodeOptions,
    IdnaCodec, Outcome, SkipList,
};

/// Codec that answers from a script and counts calls
#[derive(Debug, Default)]
pub struct ScriptedCodec {
    responses: ScriptedResponses,
    calls: AtomicUsize,
}

impl ScriptedCodec {
    pub fn new(responses: ScriptedResponses) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    /// Same output for every operation
    pub fn echo(output: &str) -> Self {
        Self::new(ScriptedResponses {
            decode: Some(Response::Output(output.to_string())),
            encode: Some(Response::Output(output.to_string())),
            ..ScriptedResponses::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, response: Option<&Response>, what: &str) -> Result<String, CodecError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match response {
            Some(Response::Output(s)) => Ok(s.clone()),
            Some(Response::Error { error: ErrorKind::Validation }) => {
                Err(CodecError::validation(format!("scripted {} failure", what)))
            }
            Some(Response::Error { error: ErrorKind::UnsupportedVersion }) => {
                Err(CodecError::unsupported_version("scripted: Unicode 99.0"))
            }
            None => Err(CodecError::validation(format!("no scripted response for {}", what))),
        }
    }
}

impl IdnaCodec for ScriptedCodec {
    fn decode(&self, _input: &str, options: DecodeOptions) -> Result<String, CodecError> {
        assert_eq!(options, DecodeOptions::STRICT_UTS46);
        self.answer(self.responses.decode.as_ref(), "decode")
    }

    fn encode(&self, _input: &str, options: EncodeOptions) -> Result<Vec<u8>, CodecError> {
        assert!(options.uts46 && options.strict);
        let specific = if options.transitional {
            self.responses.encode_transitional.as_ref()
        } else {
            self.responses.encode_nontransitional.as_ref()
        };
        self.answer(specific.or(self.responses.encode.as_ref()), "encode")
            .map(String::into_bytes)
    }
}

/// Result of running a scenario
#[derive(Debug)]
pub struct ScenarioResult {
    pub passed: bool,
    pub report: CaseReport,
    pub calls: usize,
    pub errors: Vec<String>,
}

fn check_name(check: Check) -> &'static str {
    match check {
        Check::Decode => "decode",
        Check::Encode { transitional: true } => "encode_transitional",
        Check::Encode { transitional: false } => "encode_nontransitional",
    }
}

fn matches_outcome(outcome: &Outcome, expected: ExpectedOutcome) -> bool {
    matches!(
        (outcome, expected),
        (Outcome::Pass, ExpectedOutcome::Pass)
            | (Outcome::Fail(_), ExpectedOutcome::Fail)
            | (Outcome::Skip(_), ExpectedOutcome::Skip)
    )
}

fn case_outcome(expected: ExpectedOutcome) -> CaseOutcome {
    match expected {
        ExpectedOutcome::Pass => CaseOutcome::Pass,
        ExpectedOutcome::Fail => CaseOutcome::Fail,
        ExpectedOutcome::Skip => CaseOutcome::Skip,
    }
}

/// Run one line through the runner with the default skip list
pub fn run_line(line: &str, codec: &ScriptedCodec) -> CaseReport {
    let fields = parse_line(line).unwrap_or_else(|| panic!("scenario line is blank: {:?}", line));
    let skip_list = SkipList::default();
    CaseRunner::new(codec, &skip_list).run_record(&VectorRecord::new(1, fields))
}

/// Run a scenario and compare against its expectations
pub fn run_scenario(scenario: &Scenario) -> ScenarioResult {
    let codec = ScriptedCodec::new(scenario.codec.clone());
    let report = run_line(&scenario.line, &codec);
    let errors = compare(&scenario.expect, &report, codec.calls());

    ScenarioResult {
        passed: errors.is_empty(),
        report,
        calls: codec.calls(),
        errors,
    }
}

fn compare(expected: &Expected, report: &CaseReport, calls: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if report.outcome() != case_outcome(expected.outcome) {
        errors.push(format!(
            "Outcome mismatch: expected {:?}, got {:?}",
            expected.outcome,
            report.outcome()
        ));
    }

    if calls != expected.calls {
        errors.push(format!("Call count mismatch: expected {}, got {}", expected.calls, calls));
    }

    for (name, want) in &expected.checks {
        match report.checks.iter().find(|c| check_name(c.check) == name.as_str()) {
            Some(c) if matches_outcome(&c.outcome, *want) => {}
            Some(c) => errors.push(format!("Check {}: expected {:?}, got {:?}", name, want, c.outcome)),
            None => errors.push(format!("Check {}: did not run", name)),
        }
    }

    if let Some(needle) = &expected.message_contains {
        let failures = report.failures();
        if !failures.iter().any(|m| m.contains(needle.as_str())) {
            errors.push(format!("No failure message contains {:?}: {:?}", needle, failures));
        }
    }

    errors
}

impl ScenarioResult {
    /// Print detailed failure info
    pub fn print_failure(&self, scenario: &Scenario) {
        eprintln!("\n=== FAILED: {} ===", scenario.id);
        eprintln!("{}", scenario.desc);
        eprintln!("\nLine:\n  {}", scenario.line);
        eprintln!("\nCodec calls: {}", self.calls);
        eprintln!("\nChecks:");
        for c in &self.report.checks {
            eprintln!("  {}: {:?}", c.check, c.outcome);
        }
        eprintln!("\nStatus: {:?}", self.report.status);
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
