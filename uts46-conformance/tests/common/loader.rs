//! Scenario loading from YAML files
//!
//! A scenario is one vector line, the responses a scripted codec gives for
//! it, and what the harness must report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A single scenario from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub desc: String,
    /// Raw corpus line, escapes unresolved
    pub line: String,
    #[serde(default)]
    pub codec: ScriptedResponses,
    pub expect: Expected,
}

/// Responses keyed by operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedResponses {
    pub decode: Option<Response>,
    /// Used for both transitional settings unless overridden
    pub encode: Option<Response>,
    pub encode_transitional: Option<Response>,
    pub encode_nontransitional: Option<Response>,
}

/// A codec response - either an output string or `{ error: kind }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Output(String),
    Error { error: ErrorKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    UnsupportedVersion,
}

/// What the harness must report
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expected {
    pub outcome: ExpectedOutcome,
    /// Total codec calls
    pub calls: usize,
    /// Per-check outcomes: decode, encode_transitional, encode_nontransitional
    #[serde(default)]
    pub checks: BTreeMap<String, ExpectedOutcome>,
    /// Substring every failure message list must contain
    #[serde(default)]
    pub message_contains: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedOutcome {
    Pass,
    Fail,
    Skip,
}

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load all scenarios from a YAML fixture file
pub fn load_scenarios(path: &Path) -> Vec<Scenario> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load scenarios from the standard fixtures directory
pub fn load_scenarios_by_name(name: &str) -> Vec<Scenario> {
    load_scenarios(&fixture_path(&format!("{}.yaml", name)))
}
