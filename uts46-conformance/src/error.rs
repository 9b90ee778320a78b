//! Error types for corpus loading, vector construction and configuration.
//!
//! Collaborator failures live in [`crate::codec::CodecError`]; they are
//! outcomes of a check, not errors of the harness.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or decode the vector corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be opened or read.
    #[error("failed to read corpus {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an in-memory or already-open stream failed.
    #[error("failed to read corpus stream: {0}")]
    Stream(#[from] std::io::Error),

    /// A line was not valid UTF-8.
    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

/// An escape sequence produced something that is not a Unicode scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// A surrogate code unit was left without a partner after pairing.
    #[error("unpaired surrogate U+{unit:04X} at code unit {offset}")]
    UnpairedSurrogate { unit: u16, offset: usize },
}

/// A parsed record could not be turned into a test vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Fewer fields than the format requires, or an unknown mode letter.
    #[error("malformed vector on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A field contains an escape that cannot be represented.
    #[error("line {line}: {source}")]
    Escape {
        line: usize,
        #[source]
        source: EscapeError,
    },
}

/// Failure to load harness configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configured skip-list entry uses an escape that cannot be represented.
    #[error("skip-list entry {entry:?}: {source}")]
    SkipEntry {
        entry: String,
        #[source]
        source: EscapeError,
    },
}

/// Anything that stops a suite from being built.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
