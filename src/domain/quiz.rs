use serde::{Deserialize, Serialize};

/// Shape of a quiz question. Assigned by rotating through `ROTATION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  /// Headword shown, pick the meaning
  MeaningChoice,
  /// Meaning shown, pick the headword
  WordChoice,
  /// Meaning shown, type the headword
  Spelling,
}

impl QuestionKind {
  pub const ROTATION: [QuestionKind; 3] = [Self::MeaningChoice, Self::WordChoice, Self::Spelling];

  pub fn for_index(index: usize) -> Self {
    Self::ROTATION[index % Self::ROTATION.len()]
  }

  pub fn is_choice(&self) -> bool {
    !matches!(self, Self::Spelling)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::MeaningChoice => "choice",
      Self::WordChoice => "choice_reverse",
      Self::Spelling => "spell",
    }
  }
}

/// One question in a practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  /// Position before the final shuffle
  pub id: usize,
  pub kind: QuestionKind,
  pub word_id: u32,
  pub word: String,
  pub meaning: String,
  pub prompt: String,
  /// Correct answer; lowercased headword for spelling questions
  pub answer: String,
  /// Empty for spelling questions
  pub choices: Vec<String>,
  /// First letter followed by underscores, spelling questions only
  pub hint: Option<String>,
}

impl Question {
  /// Text recorded as the expected answer in the wrong-answer book
  pub fn expected_answer(&self) -> &str {
    match self.kind {
      QuestionKind::MeaningChoice => &self.answer,
      QuestionKind::WordChoice | QuestionKind::Spelling => &self.meaning,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rotation_cycles() {
    assert_eq!(QuestionKind::for_index(0), QuestionKind::MeaningChoice);
    assert_eq!(QuestionKind::for_index(1), QuestionKind::WordChoice);
    assert_eq!(QuestionKind::for_index(2), QuestionKind::Spelling);
    assert_eq!(QuestionKind::for_index(3), QuestionKind::MeaningChoice);
    assert_eq!(QuestionKind::for_index(10), QuestionKind::WordChoice);
  }

  #[test]
  fn test_expected_answer_by_kind() {
    let mut q = Question {
      id: 0,
      kind: QuestionKind::WordChoice,
      word_id: 1,
      word: "abandon".into(),
      meaning: "放弃".into(),
      prompt: String::new(),
      answer: "abandon".into(),
      choices: vec![],
      hint: None,
    };
    assert_eq!(q.expected_answer(), "放弃");

    q.kind = QuestionKind::MeaningChoice;
    q.answer = "放弃".into();
    assert_eq!(q.expected_answer(), "放弃");
  }
}
