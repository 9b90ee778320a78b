//! Expected-result fields and the forced-error bracket convention.
//!
//! An expected field whose first character is `[` (for example `[A4_2]` or
//! `[B1, V6]`) means the operation is required to fail. The bracket content
//! names the UTS46 rules involved; it is kept for failure messages only.

use std::fmt;

/// What a check expects the collaborator to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The operation must succeed with exactly this output.
    Value(String),

    /// The operation must fail. Holds the marker text verbatim.
    Error(String),
}

impl Expectation {
    /// Interpret an already-resolved, already-defaulted field.
    pub fn from_field(field: impl Into<String>) -> Self {
        let field = field.into();
        if is_forced_error(&field) {
            Expectation::Error(field)
        } else {
            Expectation::Value(field)
        }
    }

    /// Check if this expectation requires a failure.
    #[inline]
    pub fn is_forced_error(&self) -> bool {
        matches!(self, Expectation::Error(_))
    }

    /// Try to get the expected output.
    #[inline]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Expectation::Value(v) => Some(v),
            Expectation::Error(_) => None,
        }
    }

    /// The field text, marker or value.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Expectation::Value(s) | Expectation::Error(s) => s,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field is a forced-error marker iff it starts with `[`.
#[inline]
pub fn is_forced_error(field: &str) -> bool {
    field.starts_with('[')
}
