//! The IDNA codec under test.
//!
//! The harness never implements UTS46 itself. It drives an [`IdnaCodec`]
//! through two operations and classifies failures by [`CodecError`] variant.
//!
//! With the `idna-backend` feature (on by default), [`Uts46Codec`] adapts the
//! `idna` crate to this interface.

use thiserror::Error;

/// Options for [`IdnaCodec::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Apply UTS46 mapping before validation.
    pub uts46: bool,
    /// Apply strict validation rules.
    pub strict: bool,
}

impl DecodeOptions {
    /// UTS46 mapping with strict validation, as every vector is checked.
    pub const STRICT_UTS46: Self = Self {
        uts46: true,
        strict: true,
    };
}

/// Options for [`IdnaCodec::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub uts46: bool,
    pub strict: bool,
    /// Use transitional processing (deviation characters are mapped).
    pub transitional: bool,
}

impl EncodeOptions {
    /// UTS46 mapping with strict validation under the given transitional flag.
    pub const fn strict_uts46(transitional: bool) -> Self {
        Self {
            uts46: true,
            strict: true,
            transitional,
        }
    }
}

/// Why a codec operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input needs a newer Unicode version than the codec's tables cover.
    #[error("unsupported Unicode version: {detail}")]
    UnsupportedUnicodeVersion { detail: String },

    /// The input violates an IDNA/UTS46 rule.
    #[error("validation failed: {detail}")]
    Validation { detail: String },

    /// `encode` produced bytes outside ASCII.
    #[error("encode produced non-ASCII output {output:?}")]
    NonAsciiOutput { output: Vec<u8> },
}

impl CodecError {
    pub fn validation(detail: impl Into<String>) -> Self {
        CodecError::Validation {
            detail: detail.into(),
        }
    }

    pub fn unsupported_version(detail: impl Into<String>) -> Self {
        CodecError::UnsupportedUnicodeVersion {
            detail: detail.into(),
        }
    }

    /// Check if the failure means "cannot evaluate here" rather than "wrong".
    #[inline]
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, CodecError::UnsupportedUnicodeVersion { .. })
    }
}

/// An IDNA implementation the harness can check.
///
/// Implementations must be stateless from the harness' point of view: each
/// call depends only on its arguments.
pub trait IdnaCodec {
    /// ToUnicode: map, decode punycode labels and validate.
    fn decode(&self, input: &str, options: DecodeOptions) -> Result<String, CodecError>;

    /// ToASCII: map, validate and punycode-encode non-ASCII labels.
    fn encode(&self, input: &str, options: EncodeOptions) -> Result<Vec<u8>, CodecError>;
}

impl<C: IdnaCodec + ?Sized> IdnaCodec for &C {
    fn decode(&self, input: &str, options: DecodeOptions) -> Result<String, CodecError> {
        (**self).decode(input, options)
    }

    fn encode(&self, input: &str, options: EncodeOptions) -> Result<Vec<u8>, CodecError> {
        (**self).encode(input, options)
    }
}

/// Encode and require ASCII output.
pub(crate) fn encode_ascii<C: IdnaCodec + ?Sized>(
    codec: &C,
    input: &str,
    options: EncodeOptions,
) -> Result<String, CodecError> {
    let output = codec.encode(input, options)?;
    if !output.is_ascii() {
        return Err(CodecError::NonAsciiOutput { output });
    }
    String::from_utf8(output).map_err(|e| CodecError::NonAsciiOutput {
        output: e.into_bytes(),
    })
}

#[cfg(feature = "idna-backend")]
pub use self::idna_backend::Uts46Codec;

#[cfg(feature = "idna-backend")]
mod idna_backend {
    use super::{CodecError, DecodeOptions, EncodeOptions, IdnaCodec};

    /// [`IdnaCodec`] over the `idna` crate.
    ///
    /// `strict` turns on the STD3 ASCII rules and the hyphen checks. The
    /// crate always applies UTS46 mapping, so `uts46` is implied. It carries
    /// no table version either, so it never reports
    /// [`CodecError::UnsupportedUnicodeVersion`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Uts46Codec {
        /// Also enforce DNS length limits in strict mode.
        pub verify_dns_length: bool,
    }

    impl Uts46Codec {
        pub fn new() -> Self {
            Self::default()
        }

        fn config(&self, strict: bool) -> idna::Config {
            idna::Config::default()
                .use_std3_ascii_rules(strict)
                .check_hyphens(strict)
                .verify_dns_length(strict && self.verify_dns_length)
        }
    }

    impl IdnaCodec for Uts46Codec {
        fn decode(&self, input: &str, options: DecodeOptions) -> Result<String, CodecError> {
            let (output, result) = self
                .config(options.strict)
                .transitional_processing(false)
                .to_unicode(input);
            result.map_err(|errors| CodecError::validation(errors.to_string()))?;
            Ok(output)
        }

        fn encode(&self, input: &str, options: EncodeOptions) -> Result<Vec<u8>, CodecError> {
            self.config(options.strict)
                .transitional_processing(options.transitional)
                .to_ascii(input)
                .map(String::into_bytes)
                .map_err(|errors| CodecError::validation(errors.to_string()))
        }
    }

}
