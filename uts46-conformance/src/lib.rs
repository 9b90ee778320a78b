//! UTS46 Conformance Harness
//!
//! Checks an IDNA/UTS46 codec against the Unicode `IdnaTest.txt` vectors.
//! The harness parses the table, resolves escaped characters, drops disputed
//! vectors, and runs every remaining line through the codec's decode and
//! encode operations.
//!
//! # Architecture
//!
//! - **corpus.rs** - Line parser and (gzip) corpus reader
//! - **escape.rs** - `\uXXXX` and surrogate-pair resolution
//! - **expect.rs** - Expected values and the `[...]` forced-error convention
//! - **vector.rs** - Resolved test vectors and mode letters
//! - **skip_list.rs** - Excluded sources with reasons
//! - **codec.rs** - The codec interface and the `idna` crate adapter
//! - **runner.rs** - Per-case checks and outcomes
//! - **suite.rs** - Case identity, suite runs and reports
//! - **config.rs** - TOML configuration
//!
//! # Example
//!
//! ```
//! use uts46_conformance::{corpus, SkipList, Suite, Uts46Codec};
//!
//! let records = corpus::parse_str("B; xn--caf-dma.com; café.com; xn--caf-dma.com\n");
//! let suite = Suite::from_records("IdnaTest", "IdnaTest.txt", records, SkipList::default());
//! let report = suite.run(&Uts46Codec::new());
//! assert!(report.all_passed(), "{:?}", report.failures());
//! ```

pub mod codec;
pub mod config;
pub mod corpus;
pub mod error;
pub mod escape;
pub mod expect;
pub mod runner;
pub mod skip_list;
pub mod suite;
pub mod vector;

pub use codec::{CodecError, DecodeOptions, EncodeOptions, IdnaCodec};
#[cfg(feature = "idna-backend")]
pub use codec::Uts46Codec;
pub use config::HarnessConfig;
pub use corpus::VectorRecord;
pub use error::{ConfigError, CorpusError, EscapeError, HarnessError, VectorError};
pub use expect::Expectation;
pub use runner::{CaseOutcome, CaseReport, CaseRunner, CaseStatus, Check, CheckReport, Outcome};
pub use skip_list::{SkipList, SkipReason};
pub use suite::{CaseResult, Suite, SuiteReport, VectorCase};
pub use vector::{ModeSpec, TestVector};
