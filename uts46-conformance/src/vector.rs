//! Resolved test vectors.
//!
//! A [`TestVector`] is built from one [`VectorRecord`]: the first four fields
//! are escape-resolved, empty expectations are defaulted, and the mode letter
//! decides which transitional settings the encode check runs under.

use std::fmt;

use crate::corpus::VectorRecord;
use crate::error::VectorError;
use crate::escape;
use crate::expect::Expectation;

/// Which processing modes a vector applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeSpec {
    /// `B`: both transitional and non-transitional.
    Both,
    /// `T`: transitional only.
    Transitional,
    /// `N`: non-transitional only.
    NonTransitional,
}

impl ModeSpec {
    /// Parse the mode letter.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "B" => Some(ModeSpec::Both),
            "T" => Some(ModeSpec::Transitional),
            "N" => Some(ModeSpec::NonTransitional),
            _ => None,
        }
    }

    /// Transitional flag values the encode check must cover, in order.
    pub fn transitional_flags(self) -> &'static [bool] {
        match self {
            ModeSpec::Both => &[true, false],
            ModeSpec::Transitional => &[true],
            ModeSpec::NonTransitional => &[false],
        }
    }

    pub fn letter(self) -> char {
        match self {
            ModeSpec::Both => 'B',
            ModeSpec::Transitional => 'T',
            ModeSpec::NonTransitional => 'N',
        }
    }
}

impl fmt::Display for ModeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One fully resolved vector, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub line: usize,
    pub mode: ModeSpec,
    pub source: String,
    pub expected_unicode: Expectation,
    pub expected_ascii: Expectation,
    pub nv8: bool,
}

impl TestVector {
    /// Build a vector from a parsed record.
    ///
    /// Escapes are resolved before the mode is inspected, so a field that
    /// cannot be represented is reported as [`VectorError::Escape`] even on an
    /// otherwise malformed line.
    pub fn from_record(record: &VectorRecord) -> Result<Self, VectorError> {
        let line = record.line;
        if record.fields.len() < 4 {
            return Err(VectorError::Malformed {
                line,
                reason: format!("expected at least 4 fields, found {}", record.fields.len()),
            });
        }

        let resolve = |field: &String| {
            escape::resolve(field)
                .map(|value| value.into_owned())
                .map_err(|source| VectorError::Escape { line, source })
        };
        let types = resolve(&record.fields[0])?;
        let source = resolve(&record.fields[1])?;
        let to_unicode = resolve(&record.fields[2])?;
        let to_ascii = resolve(&record.fields[3])?;

        let mode = ModeSpec::parse(&types).ok_or_else(|| VectorError::Malformed {
            line,
            reason: format!("unknown mode {:?}", types),
        })?;

        let to_unicode = if to_unicode.is_empty() { source.clone() } else { to_unicode };
        let to_ascii = if to_ascii.is_empty() { to_unicode.clone() } else { to_ascii };
        let nv8 = record.fields.get(4).is_some_and(|f| !f.is_empty());

        Ok(TestVector {
            line,
            mode,
            source,
            expected_unicode: Expectation::from_field(to_unicode),
            expected_ascii: Expectation::from_field(to_ascii),
            nv8,
        })
    }
}
