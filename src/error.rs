//! Error types for ielts_notebook.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading the word catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("catalog is not valid JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("duplicate word id {id} ({word})")]
  DuplicateId { id: u32, word: String },
}

/// Errors raised by the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("database error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("database unavailable (lock poisoned)")]
  LockPoisoned,

  #[error("could not encode value for {key}: {source}")]
  Encode {
    key: &'static str,
    #[source]
    source: serde_json::Error,
  },
}

/// Failure of a single remote translation call.
///
/// Never reaches callers of the translation service; it is logged and
/// replaced by the fallback string.
#[derive(Debug, Error)]
pub enum TranslateError {
  #[error("translation timed out after {0:?}")]
  Timeout(Duration),

  #[error("translation request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("translation service answered with status {0}")]
  Status(u64),

  #[error("malformed translation response: {0}")]
  Malformed(String),
}

/// User-facing article import failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleError {
  #[error("please enter a valid http(s) link")]
  InvalidUrl,

  #[error("article text is empty")]
  EmptyText,

  #[error("could not fetch the page: {0}")]
  FetchFailed(String),

  #[error("could not extract enough text from the page")]
  TooLittleContent,

  #[error("article storage is unavailable")]
  StoreUnavailable,
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("could not read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config: {0}")]
  Parse(#[from] toml::de::Error),
}
