//! Test utilities for store and catalog setup.
//!
//! Reuses the authoritative migrations so tests never duplicate the schema.

use tempfile::TempDir;

use crate::content::WordCatalog;
use crate::db::{self, DbPool};
use crate::domain::{Level, WordEntry};

/// Test environment with a file-backed store in a temporary directory.
///
/// The directory is removed when the environment is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Shared store handle, as handed to the translation cache
    pub pool: DbPool,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let pool = db::init_db(&temp.path().join("ielts.db"))?;
        Ok(Self { temp, pool })
    }
}

/// Minimal catalog entry for tests
pub fn word(id: u32, headword: &str, meaning: &str, level: Level) -> WordEntry {
    WordEntry {
        id,
        word: headword.to_string(),
        phonetic: String::new(),
        part_of_speech: "n.".to_string(),
        meaning: meaning.to_string(),
        level,
        examples: vec![],
    }
}

/// Catalog of `n` basic words: ids 1..=n, headwords `word1`.., meanings `meaning1`..
pub fn numbered_catalog(n: u32) -> WordCatalog {
    let entries = (1..=n)
        .map(|i| word(i, &format!("word{}", i), &format!("meaning{}", i), Level::Basic))
        .collect();
    WordCatalog::from_entries(entries).unwrap_or_default()
}
