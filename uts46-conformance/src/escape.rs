//! Escape resolution for vector fields.
//!
//! `IdnaTest.txt` spells some characters as `\uXXXX`, including
//! supplementary-plane characters written as two escaped surrogates.
//! Resolution happens in two stages over UTF-16 code units:
//!
//! 1. every `\u` + four hex digits becomes that code unit, other text is
//!    copied as its UTF-16 encoding;
//! 2. a high surrogate immediately followed by a low surrogate is folded into
//!    the supplementary code point the pair encodes.
//!
//! Anything still a surrogate after stage 2 cannot live in a `String`, so it
//! is reported as [`EscapeError::UnpairedSurrogate`].

use std::borrow::Cow;

use memchr::memchr;

use crate::error::EscapeError;

const HIGH_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Resolve `\uXXXX` escapes and surrogate pairs in a single field.
///
/// Fields without a backslash are returned borrowed.
pub fn resolve(field: &str) -> Result<Cow<'_, str>, EscapeError> {
    if memchr(b'\\', field.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(field));
    }
    let units = expand_escapes(field);
    compose_surrogates(&units).map(Cow::Owned)
}

/// Stage 1: expand escapes into raw UTF-16 code units.
fn expand_escapes(field: &str) -> Vec<u16> {
    let bytes = field.as_bytes();
    let mut units = Vec::with_capacity(field.len());
    let mut pos = 0;

    while let Some(offset) = memchr(b'\\', &bytes[pos..]) {
        let start = pos + offset;
        units.extend(field[pos..start].encode_utf16());
        match escape_at(bytes, start) {
            Some(unit) => {
                units.push(unit);
                pos = start + 6;
            }
            None => {
                units.push(u16::from(b'\\'));
                pos = start + 1;
            }
        }
    }
    units.extend(field[pos..].encode_utf16());
    units
}

/// Decode `\uXXXX` starting at `start`, if present.
fn escape_at(bytes: &[u8], start: usize) -> Option<u16> {
    let seq = bytes.get(start..start + 6)?;
    if seq[1] != b'u' {
        return None;
    }
    seq[2..].iter().try_fold(0u16, |acc, &b| {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };
        Some((acc << 4) | u16::from(digit))
    })
}

/// Stage 2: fold surrogate pairs and build the final string.
fn compose_surrogates(units: &[u16]) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        let unit = units[i];
        let code_point = if HIGH_SURROGATES.contains(&unit) {
            match units.get(i + 1) {
                Some(&low) if LOW_SURROGATES.contains(&low) => {
                    i += 1;
                    (u32::from(unit) - 0xD800) * 0x400 + (u32::from(low) - 0xDC00) + 0x10000
                }
                _ => return Err(EscapeError::UnpairedSurrogate { unit, offset: i }),
            }
        } else {
            u32::from(unit)
        };

        // Only lone low surrogates fail here; everything else is a scalar value.
        let c = char::from_u32(code_point)
            .ok_or(EscapeError::UnpairedSurrogate { unit, offset: i })?;
        out.push(c);
        i += 1;
    }

    Ok(out)
}
