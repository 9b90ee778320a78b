//! Running one vector against a codec.
//!
//! Every case makes one decode check and one encode check per transitional
//! flag its mode requires. Each check has its own outcome; the case outcome
//! is the worst of them (`Fail` over `Skip` over `Pass`).
//!
//! # Check policy
//!
//! | codec result            | expected is `[marker]` | expected is a value          |
//! |-------------------------|------------------------|------------------------------|
//! | `Ok(output)`            | Fail (no error)        | Pass iff `output == expected`|
//! | unsupported version     | Skip                   | Skip                         |
//! | any other error         | Pass                   | Pass iff NV8, else Fail      |

use std::fmt;

use tracing::{debug, warn};

use crate::codec::{encode_ascii, CodecError, DecodeOptions, EncodeOptions, IdnaCodec};
use crate::corpus::VectorRecord;
use crate::error::VectorError;
use crate::escape;
use crate::expect::Expectation;
use crate::skip_list::{SkipList, SkipReason};
use crate::vector::TestVector;

// ============================================================================
// Outcomes
// ============================================================================

/// One codec call made for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Decode,
    Encode { transitional: bool },
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Decode => f.write_str("decode"),
            Check::Encode { transitional } => write!(f, "encode(transitional={})", transitional),
        }
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// The assertion was violated. Holds the failure message.
    Fail(String),
    /// The check could not be evaluated here. Holds the reason.
    Skip(String),
}

impl Outcome {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    #[inline]
    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip(_))
    }
}

/// Check and outcome together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub check: Check,
    pub outcome: Outcome,
}

/// Overall verdict for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseOutcome {
    Pass,
    Fail,
    Skip,
}

/// How far a case got before checks ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    /// Checks were run; see [`CaseReport::checks`].
    Ran,
    /// The source is on the skip list. Counts as a pass.
    Excluded(SkipReason),
    /// A field holds a code point that cannot be represented.
    Unrepresentable(String),
    /// The line does not form a vector.
    Malformed(String),
}

/// Everything that happened to one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub line: usize,
    pub status: CaseStatus,
    pub checks: Vec<CheckReport>,
}

impl CaseReport {
    fn early(line: usize, status: CaseStatus) -> Self {
        Self {
            line,
            status,
            checks: Vec::new(),
        }
    }

    /// Fail if any check failed, Skip if any skipped, else Pass.
    pub fn outcome(&self) -> CaseOutcome {
        match self.status {
            CaseStatus::Excluded(_) => CaseOutcome::Pass,
            CaseStatus::Unrepresentable(_) => CaseOutcome::Skip,
            CaseStatus::Malformed(_) => CaseOutcome::Fail,
            CaseStatus::Ran => {
                if self.checks.iter().any(|c| c.outcome.is_fail()) {
                    CaseOutcome::Fail
                } else if self.checks.iter().any(|c| c.outcome.is_skip()) {
                    CaseOutcome::Skip
                } else {
                    CaseOutcome::Pass
                }
            }
        }
    }

    /// Failure messages, one per failed check.
    pub fn failures(&self) -> Vec<String> {
        match &self.status {
            CaseStatus::Malformed(reason) => vec![reason.clone()],
            CaseStatus::Ran => self
                .checks
                .iter()
                .filter_map(|c| match &c.outcome {
                    Outcome::Fail(msg) => Some(msg.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Outcome of a particular check, if it ran.
    pub fn check(&self, check: Check) -> Option<&Outcome> {
        self.checks.iter().find(|c| c.check == check).map(|c| &c.outcome)
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Apply the check policy to one codec result.
pub fn evaluate(
    check: Check,
    source: &str,
    expected: &Expectation,
    nv8: bool,
    result: Result<String, CodecError>,
) -> Outcome {
    match (result, expected) {
        (Ok(_), Expectation::Error(marker)) => Outcome::Fail(format!(
            "{} did not emit required error {} for {:?}",
            check, marker, source
        )),
        (Ok(output), Expectation::Value(want)) => {
            if &output == want {
                Outcome::Pass
            } else {
                Outcome::Fail(format!(
                    "unexpected {} output for {:?}: expected {:?}, got {:?}",
                    check, source, want, output
                ))
            }
        }
        (Err(err), _) if err.is_unsupported_version() => Outcome::Skip(format!(
            "{} needs a newer Unicode version than the codec supports: {}",
            check, err
        )),
        (Err(_), Expectation::Error(_)) => Outcome::Pass,
        (Err(_), Expectation::Value(_)) if nv8 => Outcome::Pass,
        (Err(err), Expectation::Value(want)) => Outcome::Fail(format!(
            "{} failed for {:?} (expected {:?}): {}",
            check, source, want, err
        )),
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Runs cases against one codec with one skip list.
pub struct CaseRunner<'a, C: ?Sized> {
    codec: &'a C,
    skip_list: &'a SkipList,
}

impl<'a, C: IdnaCodec + ?Sized> CaseRunner<'a, C> {
    pub fn new(codec: &'a C, skip_list: &'a SkipList) -> Self {
        Self { codec, skip_list }
    }

    /// Build the vector for a record and run it.
    ///
    /// The skip list is consulted on the resolved source before the mode
    /// letter is read, so an excluded line never fails on its mode.
    pub fn run_record(&self, record: &VectorRecord) -> CaseReport {
        if let Some(reason) = self.excluded(record) {
            debug!(line = record.line, %reason, "vector excluded by skip list");
            return CaseReport::early(record.line, CaseStatus::Excluded(reason.clone()));
        }

        match TestVector::from_record(record) {
            Ok(vector) => self.run_vector(&vector),
            Err(err @ VectorError::Escape { .. }) => {
                debug!(line = record.line, error = %err, "skipping unrepresentable vector");
                CaseReport::early(record.line, CaseStatus::Unrepresentable(err.to_string()))
            }
            Err(err @ VectorError::Malformed { .. }) => {
                warn!(line = record.line, error = %err, "malformed vector");
                CaseReport::early(record.line, CaseStatus::Malformed(err.to_string()))
            }
        }
    }

    fn excluded(&self, record: &VectorRecord) -> Option<&'a SkipReason> {
        if record.fields.len() < 4 {
            return None;
        }
        let source = escape::resolve(&record.fields[1]).ok()?;
        self.skip_list.lookup(&source)
    }

    /// Run the decode check and every required encode check.
    pub fn run_vector(&self, vector: &TestVector) -> CaseReport {
        if let Some(reason) = self.skip_list.lookup(&vector.source) {
            debug!(line = vector.line, %reason, "vector excluded by skip list");
            return CaseReport::early(vector.line, CaseStatus::Excluded(reason.clone()));
        }

        let flags = vector.mode.transitional_flags();
        let mut checks = Vec::with_capacity(1 + flags.len());
        checks.push(self.check_decode(vector));
        for &transitional in flags {
            checks.push(self.check_encode(vector, transitional));
        }

        for report in &checks {
            match &report.outcome {
                Outcome::Fail(msg) => warn!(line = vector.line, check = %report.check, "{}", msg),
                Outcome::Skip(msg) => debug!(line = vector.line, check = %report.check, "{}", msg),
                Outcome::Pass => {}
            }
        }

        CaseReport {
            line: vector.line,
            status: CaseStatus::Ran,
            checks,
        }
    }

    fn check_decode(&self, vector: &TestVector) -> CheckReport {
        let check = Check::Decode;
        let result = self.codec.decode(&vector.source, DecodeOptions::STRICT_UTS46);
        CheckReport {
            check,
            outcome: evaluate(check, &vector.source, &vector.expected_unicode, vector.nv8, result),
        }
    }

    fn check_encode(&self, vector: &TestVector, transitional: bool) -> CheckReport {
        let check = Check::Encode { transitional };
        let options = EncodeOptions::strict_uts46(transitional);
        let result = encode_ascii(self.codec, &vector.source, options);
        CheckReport {
            check,
            outcome: evaluate(check, &vector.source, &vector.expected_ascii, vector.nv8, result),
        }
    }
}
