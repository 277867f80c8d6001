//! Practice session generation.
//!
//! A session prefers words the learner has already seen, pads with unseen
//! catalog words when there are too few, and reserves up to half of the
//! slots for words answered wrongly before:
//! - Pool: seen words (level sets), padded with untracked words
//! - Selection: up to ceil(N/2) previously-wrong words, rest normal words
//! - Shapes: rotate meaning-choice, word-choice, spelling by position
//!
//! Small catalogs or pools give shorter sessions rather than errors.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;

use crate::config;
use crate::content::WordCatalog;
use crate::db;
use crate::domain::{ProgressRecord, Question, QuestionKind, WordEntry, WrongAnswerEntry};

/// Build a session from the stored progress and wrong-answer book
pub fn generate_quiz_from_store(conn: &Connection, catalog: &WordCatalog, count: usize) -> Vec<Question> {
  let progress = db::get_learning_progress(conn);
  let wrong_answers = db::get_wrong_answers(conn);
  generate_quiz(count, catalog, &progress, &wrong_answers, &mut rand::rng())
}

pub fn generate_quiz<R: Rng + ?Sized>(
  count: usize,
  catalog: &WordCatalog,
  progress: &ProgressRecord,
  wrong_answers: &[WrongAnswerEntry],
  rng: &mut R,
) -> Vec<Question> {
  let pool = build_pool(count, catalog, progress, rng);
  let selected = select_words(count, pool, wrong_answers, rng);

  if selected.len() < count {
    tracing::debug!("Quiz shortened to {} of {} questions", selected.len(), count);
  }

  let mut questions: Vec<Question> = selected
    .into_iter()
    .enumerate()
    .map(|(idx, word)| build_question(idx, word, catalog, rng))
    .collect();

  questions.shuffle(rng);
  questions
}

/// Seen words, padded with random untracked words up to `count`
fn build_pool<'a, R: Rng + ?Sized>(
  count: usize,
  catalog: &'a WordCatalog,
  progress: &ProgressRecord,
  rng: &mut R,
) -> Vec<&'a WordEntry> {
  let mut pool = catalog.resolve(&progress.learned_ids());

  if pool.len() < count {
    let extra: Vec<&WordEntry> = catalog
      .entries()
      .iter()
      .filter(|w| !progress.contains(w.id))
      .collect();
    pool.extend(pick_random(&extra, count - pool.len(), rng));
  }

  pool
}

/// Previously-wrong words first (up to half), then normal words.
/// Leftover wrong words back-fill when normal words run out.
fn select_words<'a, R: Rng + ?Sized>(
  count: usize,
  pool: Vec<&'a WordEntry>,
  wrong_answers: &[WrongAnswerEntry],
  rng: &mut R,
) -> Vec<&'a WordEntry> {
  let wrong_ids: HashSet<u32> = wrong_answers.iter().map(|w| w.word_id).collect();
  let (mut wrong, mut normal): (Vec<_>, Vec<_>) = pool.into_iter().partition(|w| wrong_ids.contains(&w.id));

  wrong.shuffle(rng);
  normal.shuffle(rng);

  let wrong_portion = wrong.len().min(count.div_ceil(2));
  let normal_portion = count - wrong_portion;

  let leftover_wrong = wrong.split_off(wrong_portion);
  normal.truncate(normal_portion);

  let mut selected = wrong;
  selected.extend(normal);
  if selected.len() < count {
    let missing = count - selected.len();
    selected.extend(leftover_wrong.into_iter().take(missing));
  }
  selected.truncate(count);
  selected
}

fn build_question<R: Rng + ?Sized>(idx: usize, word: &WordEntry, catalog: &WordCatalog, rng: &mut R) -> Question {
  let kind = QuestionKind::for_index(idx);

  let (prompt, answer, choices, hint) = match kind {
    QuestionKind::MeaningChoice => (
      format!("What does \"{}\" mean?", word.word),
      word.meaning.clone(),
      generate_choices(&word.meaning, catalog.entries().iter().map(|w| w.meaning.as_str()), rng),
      None,
    ),
    QuestionKind::WordChoice => (
      format!("Which word means \"{}\"?", word.meaning),
      word.word.clone(),
      generate_choices(&word.word, catalog.entries().iter().map(|w| w.word.as_str()), rng),
      None,
    ),
    QuestionKind::Spelling => (
      format!("Spell the word that means \"{}\"", word.meaning),
      word.word.to_lowercase(),
      vec![],
      Some(spelling_hint(&word.word)),
    ),
  };

  Question {
    id: idx,
    kind,
    word_id: word.id,
    word: word.word.clone(),
    meaning: word.meaning.clone(),
    prompt,
    answer,
    choices,
    hint,
  }
}

/// The correct answer plus up to `DISTRACTOR_COUNT` distinct other
/// candidates, shuffled. Fewer distractors when the catalog is small.
pub fn generate_choices<'a, R: Rng + ?Sized>(
  correct: &str,
  candidates: impl Iterator<Item = &'a str>,
  rng: &mut R,
) -> Vec<String> {
  let mut distractors: Vec<String> = candidates
    .filter(|c| *c != correct)
    .map(str::to_string)
    .collect();

  distractors.sort();
  distractors.dedup();
  distractors.shuffle(rng);
  distractors.truncate(config::DISTRACTOR_COUNT);

  let mut choices = Vec::with_capacity(distractors.len() + 1);
  choices.push(correct.to_string());
  choices.extend(distractors);
  choices.shuffle(rng);
  choices
}

/// First letter, then one underscore per remaining letter
pub fn spelling_hint(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => {
      let mut hint = first.to_string();
      hint.push_str(&"_".repeat(chars.count()));
      hint
    }
    None => String::new(),
  }
}

fn pick_random<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
  let mut shuffled = items.to_vec();
  shuffled.shuffle(rng);
  shuffled.truncate(n);
  shuffled
}
