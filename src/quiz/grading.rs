//! Answer grading and its wrong-answer book side effects

use rusqlite::Connection;

use crate::db;
use crate::domain::{Question, QuestionKind};
use crate::validation::{choice_matches, spelling_matches};

pub fn is_correct(question: &Question, submitted: &str) -> bool {
  match question.kind {
    QuestionKind::MeaningChoice | QuestionKind::WordChoice => choice_matches(submitted, &question.answer),
    QuestionKind::Spelling => spelling_matches(submitted, &question.answer),
  }
}

/// Grade an answer. A correct answer clears the word from the
/// wrong-answer book; a wrong one creates or bumps its entry.
pub fn grade_answer(conn: &Connection, question: &Question, submitted: &str) -> bool {
  let correct = is_correct(question, submitted);

  if correct {
    if db::clear_wrong_answer(conn, question.word_id) {
      tracing::debug!("Cleared wrong answer for {}", question.word);
    }
  } else {
    let count = db::record_wrong_answer(conn, question.word_id, &question.word, question.expected_answer());
    tracing::debug!("Wrong answer for {} (missed {} times)", question.word, count);
  }

  correct
}
