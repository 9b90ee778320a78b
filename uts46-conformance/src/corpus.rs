//! Line-oriented parser for the `IdnaTest.txt` vector table.
//!
//! Each meaningful line is `type; source; toUnicode; toASCII[; NV8]`.
//! A `#` starts a trailing comment. Blank and comment-only lines produce no
//! record but still count toward line numbers, so every record can be traced
//! back to its position in the source file.
//!
//! The corpus is usually shipped gzip-compressed; [`read_corpus`] detects the
//! gzip magic and decompresses transparently.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::bufread::GzDecoder;
use memchr::{memchr, memchr_iter};

use crate::error::CorpusError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One non-blank line of the table, split into trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorRecord {
    /// 1-based line number in the corpus file.
    pub line: usize,
    /// Raw field text, trimmed but not escape-resolved.
    pub fields: Vec<String>,
}

impl VectorRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// The raw fields joined the way they are shown in failure reports.
    pub fn joined(&self) -> String {
        self.fields.join("; ")
    }
}

/// Split one line into fields.
///
/// Returns `None` for lines that are empty once the comment is removed.
pub fn parse_line(line: &str) -> Option<Vec<String>> {
    let content = match memchr(b'#', line.as_bytes()) {
        Some(pos) => &line[..pos],
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    let bytes = content.as_bytes();
    let mut fields = Vec::with_capacity(5);
    let mut start = 0;
    for pos in memchr_iter(b';', bytes) {
        fields.push(content[start..pos].trim().to_string());
        start = pos + 1;
    }
    fields.push(content[start..].trim().to_string());
    Some(fields)
}

/// Parse an in-memory table.
pub fn parse_str(table: &str) -> Vec<VectorRecord> {
    table
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line).map(|fields| VectorRecord::new(idx + 1, fields)))
        .collect()
}

/// Parse a table from any buffered reader.
///
/// Lines must be UTF-8; the first offending line is reported by number.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<Vec<VectorRecord>, CorpusError> {
    let mut records = Vec::new();
    let mut buf = Vec::with_capacity(128);
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = std::str::from_utf8(&buf)
            .map_err(|_| CorpusError::InvalidUtf8 { line: line_number })?;
        if let Some(fields) = parse_line(line) {
            records.push(VectorRecord::new(line_number, fields));
        }
    }

    Ok(records)
}

/// Read a corpus file, decompressing it if it is gzip data.
pub fn read_corpus(path: &Path) -> Result<Vec<VectorRecord>, CorpusError> {
    let bytes = fs::read(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.starts_with(&GZIP_MAGIC) {
        parse_reader(BufReader::new(GzDecoder::new(bytes.as_slice())))
    } else {
        parse_reader(bytes.as_slice())
    }
}
