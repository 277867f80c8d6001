//! Learner progress records persisted in the key-value store.
//!
//! Field names are serialized in camelCase so stored blobs stay readable
//! by other clients of the same store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::word::Level;

/// Which words the learner has seen at each level, and which are mastered.
///
/// A word identifier lives in at most one of the four sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
  #[serde(default)]
  pub basic: BTreeSet<u32>,
  #[serde(default)]
  pub intermediate: BTreeSet<u32>,
  #[serde(default)]
  pub advanced: BTreeSet<u32>,
  #[serde(default)]
  pub mastered: BTreeSet<u32>,
}

impl ProgressRecord {
  pub fn level_set(&self, level: Level) -> &BTreeSet<u32> {
    match level {
      Level::Basic => &self.basic,
      Level::Intermediate => &self.intermediate,
      Level::Advanced => &self.advanced,
    }
  }

  fn level_set_mut(&mut self, level: Level) -> &mut BTreeSet<u32> {
    match level {
      Level::Basic => &mut self.basic,
      Level::Intermediate => &mut self.intermediate,
      Level::Advanced => &mut self.advanced,
    }
  }

  /// Whether the word sits in any of the four sets
  pub fn contains(&self, word_id: u32) -> bool {
    self.mastered.contains(&word_id) || Level::ALL.iter().any(|l| self.level_set(*l).contains(&word_id))
  }

  /// Add a word to a level set.
  ///
  /// Returns false when the word is already tracked anywhere (including
  /// `mastered`), in which case nothing moves.
  pub fn mark_seen(&mut self, word_id: u32, level: Level) -> bool {
    if self.contains(word_id) {
      return false;
    }
    self.level_set_mut(level).insert(word_id)
  }

  /// Promote a word to `mastered`, removing it from every level set.
  pub fn mark_mastered(&mut self, word_id: u32) -> bool {
    for level in Level::ALL {
      self.level_set_mut(level).remove(&word_id);
    }
    self.mastered.insert(word_id)
  }

  /// Union of the three level sets (mastered words excluded)
  pub fn learned_ids(&self) -> BTreeSet<u32> {
    self
      .basic
      .iter()
      .chain(self.intermediate.iter())
      .chain(self.advanced.iter())
      .copied()
      .collect()
  }

  /// Sum of all four set sizes
  pub fn total_tracked(&self) -> usize {
    self.basic.len() + self.intermediate.len() + self.advanced.len() + self.mastered.len()
  }
}

/// Words learned on a single calendar day. Replaced when the date changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
  pub date: Option<NaiveDate>,
  #[serde(default)]
  pub ids: BTreeSet<u32>,
}

impl DailyActivity {
  /// Record a word for `today`, starting a fresh record if the day rolled over.
  pub fn record(&mut self, word_id: u32, today: NaiveDate) {
    if self.date != Some(today) {
      self.date = Some(today);
      self.ids.clear();
    }
    self.ids.insert(word_id);
  }

  pub fn count_for(&self, today: NaiveDate) -> usize {
    if self.date == Some(today) { self.ids.len() } else { 0 }
  }
}

/// Consecutive-day activity counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
  pub current: u32,
  pub last_date: Option<NaiveDate>,
}

impl StreakState {
  /// Advance the streak for `today`. Returns false on a same-day call.
  pub fn touch(&mut self, today: NaiveDate) -> bool {
    if self.last_date == Some(today) {
      return false;
    }

    let consecutive = self
      .last_date
      .and_then(|last| last.succ_opt())
      .is_some_and(|next| next == today);

    self.current = if consecutive { self.current + 1 } else { 1 };
    self.last_date = Some(today);
    true
  }
}

/// A word the learner got wrong, kept until it is answered correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswerEntry {
  pub word_id: u32,
  pub word: String,
  /// Expected answer shown in the wrong-answer book
  pub meaning: String,
  pub wrong_count: u32,
  pub last_wrong: DateTime<Utc>,
}

/// Aggregate quiz results for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeHistoryEntry {
  pub date: NaiveDate,
  pub total: u32,
  pub correct: u32,
  pub wrong: u32,
}

impl PracticeHistoryEntry {
  /// Rounded percentage of correct answers, None when nothing was answered
  pub fn accuracy(&self) -> Option<u32> {
    if self.total == 0 {
      return None;
    }
    Some((self.correct as f64 / self.total as f64 * 100.0).round() as u32)
  }
}

/// Learner-curated word, deduplicated by headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWord {
  pub word: String,
  #[serde(default)]
  pub meaning: String,
  #[serde(default)]
  pub phonetic: String,
  #[serde(default)]
  pub pos: String,
  pub added_at: DateTime<Utc>,
}

/// An imported reading article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
  pub id: String,
  pub title: String,
  pub content: String,
  pub created_at: DateTime<Utc>,
}

/// Dashboard numbers derived from the stored buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total_words_learned: usize,
  pub today_words_learned: usize,
  pub streak: u32,
  pub today_accuracy: Option<u32>,
}
