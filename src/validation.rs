//! Input validation for quiz answers and article imports.
//!
//! Choice questions compare exact strings. Spelling answers are compared
//! after normalisation:
//! - Unicode NFC (so composed and decomposed accents agree)
//! - Surrounding whitespace trimmed
//! - Lowercased

use reqwest::Url;
use unicode_normalization::UnicodeNormalization;

use crate::error::ArticleError;

// ============================================================================
// Answers
// ============================================================================

/// Canonical form of a typed answer
pub fn normalize_spelling(input: &str) -> String {
  input.trim().nfc().collect::<String>().to_lowercase()
}

/// Case-insensitive, trimmed exact match
pub fn spelling_matches(submitted: &str, expected: &str) -> bool {
  let submitted = normalize_spelling(submitted);
  !submitted.is_empty() && submitted == normalize_spelling(expected)
}

/// Choice answers must match the option text exactly
pub fn choice_matches(submitted: &str, expected: &str) -> bool {
  submitted == expected
}

// ============================================================================
// Article import
// ============================================================================

/// Parse an article link, accepting only http(s)
pub fn parse_article_url(input: &str) -> Result<Url, ArticleError> {
  let url = Url::parse(input.trim()).map_err(|_| ArticleError::InvalidUrl)?;
  match url.scheme() {
    "http" | "https" if url.host_str().is_some() => Ok(url),
    _ => Err(ArticleError::InvalidUrl),
  }
}

pub fn is_valid_url(input: &str) -> bool {
  parse_article_url(input).is_ok()
}

/// Trimmed article text, rejecting blank input
pub fn validate_import_text(text: &str) -> Result<&str, ArticleError> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(ArticleError::EmptyText);
  }
  Ok(trimmed)
}
