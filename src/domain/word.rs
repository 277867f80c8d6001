use serde::{Deserialize, Serialize};

/// Difficulty tier used to bucket vocabulary and progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Basic,
  Intermediate,
  Advanced,
}

impl Level {
  pub const ALL: [Level; 3] = [Level::Basic, Level::Intermediate, Level::Advanced];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "basic" => Some(Self::Basic),
      "intermediate" => Some(Self::Intermediate),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Basic => "basic",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// An example sentence with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePair {
  #[serde(rename = "en")]
  pub english: String,
  #[serde(rename = "zh")]
  pub translation: String,
}

/// Immutable catalog record. Identifiers are stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
  pub id: u32,
  /// Headword
  pub word: String,
  pub phonetic: String,
  #[serde(rename = "pos")]
  pub part_of_speech: String,
  pub meaning: String,
  pub level: Level,
  #[serde(default)]
  pub examples: Vec<ExamplePair>,
}
