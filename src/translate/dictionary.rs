//! Offline glosses for the most common English function words, used by the
//! reader when a word is tapped before any remote translation arrives.

static MINI_DICTIONARY: &[(&str, &str)] = &[
  ("the", "这个"),
  ("a", "一个"),
  ("is", "是"),
  ("are", "是"),
  ("was", "是"),
  ("have", "有"),
  ("has", "有"),
  ("do", "做"),
  ("does", "做"),
  ("will", "将"),
  ("can", "能"),
  ("could", "能"),
  ("would", "会"),
  ("should", "应该"),
  ("and", "和"),
  ("or", "或"),
  ("but", "但是"),
  ("not", "不"),
  ("no", "没有"),
];

/// Look up a word, ignoring case and surrounding whitespace
pub fn lookup_word(word: &str) -> Option<&'static str> {
  let word = word.trim().to_lowercase();
  MINI_DICTIONARY
    .iter()
    .find(|(english, _)| *english == word)
    .map(|(_, gloss)| *gloss)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup_word() {
    assert_eq!(lookup_word("The"), Some("这个"));
    assert_eq!(lookup_word(" should "), Some("应该"));
    assert_eq!(lookup_word("abandon"), None);
    assert_eq!(lookup_word(""), None);
  }
}
