//! Word catalog: the immutable vocabulary list bundled with the crate.
//!
//! Progress and wrong-answer records refer to words by id only. Catalog
//! updates are not migrated, so an id may no longer resolve; `resolve`
//! skips such ids and logs them at debug level.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::{Level, ProgressRecord, WordEntry};
use crate::error::CatalogError;

/// Bundled IELTS vocabulary (66 entries, 22 per level)
const BUILTIN_VOCABULARY: &str = include_str!("../../data/vocabulary.json");

/// Learned and total word counts for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
  pub level: Level,
  pub learned: usize,
  pub total: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
  entries: Vec<WordEntry>,
  index: HashMap<u32, usize>,
}

impl WordCatalog {
  /// Load the bundled vocabulary
  pub fn builtin() -> Result<Self, CatalogError> {
    Self::from_json(BUILTIN_VOCABULARY)
  }

  pub fn from_json(json: &str) -> Result<Self, CatalogError> {
    let entries: Vec<WordEntry> = serde_json::from_str(json)?;
    Self::from_entries(entries)
  }

  /// Build a catalog, rejecting duplicate ids
  pub fn from_entries(entries: Vec<WordEntry>) -> Result<Self, CatalogError> {
    let mut index = HashMap::with_capacity(entries.len());
    for (pos, entry) in entries.iter().enumerate() {
      if index.insert(entry.id, pos).is_some() {
        return Err(CatalogError::DuplicateId {
          id: entry.id,
          word: entry.word.clone(),
        });
      }
    }
    Ok(Self { entries, index })
  }

  pub fn entries(&self) -> &[WordEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn lookup(&self, word_id: u32) -> Option<&WordEntry> {
    self.index.get(&word_id).map(|&pos| &self.entries[pos])
  }

  /// Resolve ids to entries in catalog order, skipping unknown ids
  pub fn resolve(&self, ids: &BTreeSet<u32>) -> Vec<&WordEntry> {
    for missing in ids.iter().filter(|id| !self.index.contains_key(id)) {
      tracing::debug!("Word id {} not in catalog, skipping", missing);
    }
    self.entries.iter().filter(|e| ids.contains(&e.id)).collect()
  }

  pub fn words_in_level(&self, level: Level) -> Vec<&WordEntry> {
    self.entries.iter().filter(|e| e.level == level).collect()
  }

  /// Where a flashcard run through `level` should start: the first word
  /// not yet seen at that level, or 0 when all are seen
  pub fn first_unlearned_index(&self, level: Level, progress: &ProgressRecord) -> usize {
    let seen = progress.level_set(level);
    self
      .words_in_level(level)
      .iter()
      .position(|w| !seen.contains(&w.id))
      .unwrap_or(0)
  }

  pub fn level_progress(&self, progress: &ProgressRecord) -> Vec<LevelProgress> {
    Level::ALL
      .iter()
      .map(|&level| {
        let words = self.words_in_level(level);
        let seen = progress.level_set(level);
        LevelProgress {
          level,
          learned: words.iter().filter(|w| seen.contains(&w.id)).count(),
          total: words.len(),
        }
      })
      .collect()
  }
}
