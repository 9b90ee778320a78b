//! Harness configuration.
//!
//! Configuration is TOML:
//!
//! ```toml
//! suite = "IdnaTest"
//! corpus = "IdnaTest.txt.gz"
//! parallel = true
//!
//! [skip_list]
//! inherit_defaults = true
//! entries = [
//!     { source = "xn--example", reason = "disputed upstream" },
//! ]
//! ```
//!
//! Skip-list sources may use the corpus' `\uXXXX` notation. A relative
//! `corpus` path is resolved against the config file's directory. The
//! `UTS46_VECTORS` environment variable replaces the corpus path.
//!
//! Without a `corpus` setting the harness runs the small sample bundled in
//! `tests/fixtures`, not the full Unicode table. Point `corpus` or
//! `UTS46_VECTORS` at an `IdnaTest.txt` release to check a codec for real.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::escape;
use crate::skip_list::{SkipList, SkipReason};

/// Environment variable that overrides the corpus path.
pub const CORPUS_ENV: &str = "UTS46_VECTORS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Suite name, the prefix of every case id.
    pub suite: String,
    /// Vector corpus, plain or gzip-compressed.
    pub corpus: PathBuf,
    /// Run cases on the rayon pool.
    pub parallel: bool,
    pub skip_list: SkipListConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkipListConfig {
    /// Start from the built-in exclusions.
    pub inherit_defaults: bool,
    pub entries: Vec<SkipEntry>,
}

/// One configured exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkipEntry {
    pub source: String,
    pub reason: String,
}

/// Path of the sample corpus shipped with the crate's tests.
pub fn bundled_sample() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("IdnaTest.txt.gz")
}

/// Runs the bundled sample corpus, not the full Unicode table.
impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            suite: "IdnaTest".to_string(),
            corpus: bundled_sample(),
            parallel: false,
            skip_list: SkipListConfig::default(),
        }
    }
}

impl Default for SkipListConfig {
    fn default() -> Self {
        Self {
            inherit_defaults: true,
            entries: Vec::new(),
        }
    }
}

impl HarnessConfig {
    /// Parse configuration text. Relative paths stay relative.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a config file, resolving a relative corpus path against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if config.corpus.is_relative() {
            if let Some(dir) = path.parent() {
                config.corpus = dir.join(&config.corpus);
            }
        }
        Ok(config)
    }

    /// Apply `UTS46_VECTORS`, if set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(corpus) = var(CORPUS_ENV).filter(|v| !v.is_empty()) {
            self.corpus = PathBuf::from(corpus);
        }
        self
    }

    /// Corpus file name as shown in case descriptions, without `.gz`.
    pub fn corpus_name(&self) -> String {
        let name = self
            .corpus
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.corpus.display().to_string());
        match name.strip_suffix(".gz") {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }

    /// Build the effective skip list.
    pub fn skip_list(&self) -> Result<SkipList, ConfigError> {
        let base = if self.skip_list.inherit_defaults {
            SkipList::default()
        } else {
            SkipList::empty()
        };

        let mut entries = Vec::with_capacity(self.skip_list.entries.len());
        for entry in &self.skip_list.entries {
            let source = escape::resolve(&entry.source).map_err(|source| ConfigError::SkipEntry {
                entry: entry.source.clone(),
                source,
            })?;
            entries.push((source.into_owned(), SkipReason::Configured(entry.reason.clone())));
        }

        Ok(base.extended(entries))
    }
}
