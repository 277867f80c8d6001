//! One practice run: walks the generated questions in order, grades each
//! answer and records the session result after the last one.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use super::generator::generate_quiz_from_store;
use super::grading::grade_answer;
use crate::config;
use crate::content::WordCatalog;
use crate::db;
use crate::domain::Question;

/// Result of submitting one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
  pub correct: bool,
  /// Correct answer text, shown as feedback
  pub answer: String,
  /// True when this was the last question of the session
  pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
  pub question_id: usize,
  pub word_id: u32,
  pub submitted: String,
  pub correct: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
  questions: Vec<Question>,
  current: usize,
  answers: Vec<AnsweredQuestion>,
  /// Whether the result has been written to history
  recorded: bool,
}

impl QuizSession {
  pub fn new(questions: Vec<Question>) -> Self {
    Self {
      questions,
      ..Self::default()
    }
  }

  /// Generate a standard-size session from the stored progress
  pub fn start(conn: &Connection, catalog: &WordCatalog) -> Self {
    Self::new(generate_quiz_from_store(conn, catalog, config::QUIZ_SIZE))
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  pub fn len(&self) -> usize {
    self.questions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.questions.is_empty()
  }

  /// Zero-based position of the active question
  pub fn position(&self) -> usize {
    self.current
  }

  pub fn current(&self) -> Option<&Question> {
    self.questions.get(self.current)
  }

  pub fn is_complete(&self) -> bool {
    self.current >= self.questions.len()
  }

  pub fn answers(&self) -> &[AnsweredQuestion] {
    &self.answers
  }

  pub fn correct_count(&self) -> u32 {
    self.answers.iter().filter(|a| a.correct).count() as u32
  }

  pub fn wrong_count(&self) -> u32 {
    self.answers.len() as u32 - self.correct_count()
  }

  /// Rounded percentage of correct answers so far
  pub fn accuracy(&self) -> Option<u32> {
    if self.answers.is_empty() {
      return None;
    }
    Some((self.correct_count() as f64 / self.answers.len() as f64 * 100.0).round() as u32)
  }

  pub fn submit(&mut self, conn: &Connection, submitted: &str) -> Option<AnswerOutcome> {
    self.submit_on(conn, submitted, config::today())
  }

  /// Grade the active question and move on. Returns None once the session
  /// is complete.
  pub fn submit_on(&mut self, conn: &Connection, submitted: &str, today: NaiveDate) -> Option<AnswerOutcome> {
    let question = self.questions.get(self.current)?;
    let correct = grade_answer(conn, question, submitted);

    self.answers.push(AnsweredQuestion {
      question_id: question.id,
      word_id: question.word_id,
      submitted: submitted.to_string(),
      correct,
    });
    let answer = question.answer.clone();
    self.current += 1;

    let finished = self.is_complete();
    if finished {
      self.record_result(conn, today);
    }

    Some(AnswerOutcome {
      correct,
      answer,
      finished,
    })
  }

  fn record_result(&mut self, conn: &Connection, today: NaiveDate) {
    if self.recorded {
      return;
    }
    self.recorded = true;

    let total = self.answers.len() as u32;
    let correct = self.correct_count();
    db::record_session_result_on(conn, total, correct, total - correct, today);
    let streak = db::touch_streak_on(conn, today);
    tracing::info!(
      "Practice session finished: {}/{} correct, streak {} day(s)",
      correct,
      total,
      streak.current
    );
  }
}
