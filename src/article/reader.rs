//! Reader helpers: sentence splitting for playback and translation, and
//! word clean-up for tap-to-translate.

use std::sync::LazyLock;

use regex::Regex;

/// A run of non-terminators closed by `.`, `!` or `?`, or the unterminated tail
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").expect("valid regex"));

/// Split article text into trimmed sentences.
///
/// Text without any sentence-like run (e.g. only punctuation) comes back
/// whole; blank text gives no sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
  if text.trim().is_empty() {
    return vec![];
  }

  let mut found = false;
  let sentences: Vec<String> = SENTENCE
    .find_iter(text)
    .inspect(|_| found = true)
    .map(|m| m.as_str().trim().to_string())
    .filter(|s| !s.is_empty())
    .collect();

  if found { sentences } else { vec![text.trim().to_string()] }
}

/// Letters, apostrophes and hyphens only, lowercased. Empty when nothing
/// word-like remains.
pub fn clean_word(raw: &str) -> String {
  raw
    .chars()
    .filter(|c| c.is_ascii_alphabetic() || *c == '\'' || *c == '-')
    .collect::<String>()
    .to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_split_sentences() {
    assert_eq!(
      split_sentences("Climate matters. Does it? Yes! And the tail"),
      vec!["Climate matters.", "Does it?", "Yes!", "And the tail"]
    );
  }

  #[test]
  fn test_split_keeps_punctuation_runs() {
    assert_eq!(split_sentences("Wait... really?!"), vec!["Wait...", "really?!"]);
  }

  #[test]
  fn test_split_degenerate_input() {
    assert_eq!(split_sentences("..."), vec!["..."]);
    assert!(split_sentences("   ").is_empty());
    assert_eq!(split_sentences("no terminator"), vec!["no terminator"]);
  }

  #[test]
  fn test_clean_word() {
    assert_eq!(clean_word("\"Well-being,\""), "well-being");
    assert_eq!(clean_word("Don't"), "don't");
    assert_eq!(clean_word("2024"), "");
    assert_eq!(clean_word("café"), "caf");
  }
}
