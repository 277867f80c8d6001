//! JSON buckets over the `kv` table.
//!
//! Reads never fail: a missing row or a corrupted value yields the bucket's
//! default. Writes log and carry on when the store rejects them.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::LogOnError;
use crate::error::StoreError;

/// Logical storage buckets, one row each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Articles,
    Favorites,
    LearningProgress,
    WrongAnswers,
    PracticeHistory,
    Streak,
    TodayLearned,
    TranslationCache,
}

impl Bucket {
    pub const ALL: [Bucket; 8] = [
        Bucket::Articles,
        Bucket::Favorites,
        Bucket::LearningProgress,
        Bucket::WrongAnswers,
        Bucket::PracticeHistory,
        Bucket::Streak,
        Bucket::TodayLearned,
        Bucket::TranslationCache,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Articles => "ielts_articles",
            Self::Favorites => "ielts_favorites",
            Self::LearningProgress => "ielts_learning_progress",
            Self::WrongAnswers => "ielts_wrong_answers",
            Self::PracticeHistory => "ielts_practice_history",
            Self::Streak => "ielts_streak",
            Self::TodayLearned => "ielts_today_learned",
            Self::TranslationCache => "ielts_translate_cache",
        }
    }
}

pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
        .optional()
}

pub fn put_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
    INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
    "#,
        params![key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn delete_raw(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
    Ok(())
}

/// Read a bucket, falling back to `T::default()` when absent or unreadable
pub fn read_bucket<T: DeserializeOwned + Default>(conn: &Connection, bucket: Bucket) -> T {
    let Some(raw) = get_raw(conn, bucket.key()).log_warn(bucket.key()).flatten() else {
        return T::default();
    };

    serde_json::from_str(&raw)
        .map_err(|e| format!("corrupted value, using default: {}", e))
        .log_warn_default(bucket.key())
}

pub fn try_write_bucket<T: Serialize>(
    conn: &Connection,
    bucket: Bucket,
    value: &T,
) -> std::result::Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: bucket.key(),
        source,
    })?;
    put_raw(conn, bucket.key(), &json)?;
    Ok(())
}

/// Write a bucket; failures are logged and otherwise ignored
pub fn write_bucket<T: Serialize>(conn: &Connection, bucket: Bucket, value: &T) {
    let _ = try_write_bucket(conn, bucket, value).log_warn("Failed to persist bucket");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_bucket_keys_are_distinct() {
        let keys: HashSet<&str> = Bucket::ALL.iter().map(|b| b.key()).collect();
        assert_eq!(keys.len(), Bucket::ALL.len());
    }

    #[test]
    fn test_missing_bucket_reads_default() {
        let conn = open_in_memory().unwrap();
        let value: Vec<String> = read_bucket(&conn, Bucket::Articles);
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let conn = open_in_memory().unwrap();
        let mut map = HashMap::new();
        map.insert("hello".to_string(), "你好".to_string());
        write_bucket(&conn, Bucket::TranslationCache, &map);

        let back: HashMap<String, String> = read_bucket(&conn, Bucket::TranslationCache);
        assert_eq!(back.get("hello").map(String::as_str), Some("你好"));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let conn = open_in_memory().unwrap();
        write_bucket(&conn, Bucket::Streak, &vec![1]);
        write_bucket(&conn, Bucket::Streak, &vec![2, 3]);
        let back: Vec<i32> = read_bucket(&conn, Bucket::Streak);
        assert_eq!(back, vec![2, 3]);
    }

    #[test]
    fn test_corrupted_bucket_reads_default() {
        let conn = open_in_memory().unwrap();
        put_raw(&conn, Bucket::Favorites.key(), "{not json").unwrap();
        let value: Vec<String> = read_bucket(&conn, Bucket::Favorites);
        assert!(value.is_empty());
    }

    #[test]
    fn test_failed_write_is_silent() {
        let conn = open_in_memory().unwrap();
        conn.execute_batch("DROP TABLE kv;").unwrap();
        // Must not panic
        write_bucket(&conn, Bucket::Articles, &vec!["x"]);
        assert!(try_write_bucket(&conn, Bucket::Articles, &vec!["x"]).is_err());
    }

    #[test]
    fn test_delete_raw() {
        let conn = open_in_memory().unwrap();
        put_raw(&conn, "k", "1").unwrap();
        delete_raw(&conn, "k").unwrap();
        assert_eq!(get_raw(&conn, "k").unwrap(), None);
    }
}
