//! Flashcard study flow: moving to the next card and marking a card as
//! mastered both count as today's activity.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::config;
use crate::db;
use crate::domain::{StreakState, WordEntry};

/// The learner moved past `word`
pub fn advance(conn: &Connection, word: &WordEntry) -> StreakState {
  advance_on(conn, word, config::today())
}

pub fn advance_on(conn: &Connection, word: &WordEntry, today: NaiveDate) -> StreakState {
  db::mark_word_seen_on(conn, word.id, word.level, today);
  db::touch_streak_on(conn, today)
}

/// The learner marked `word` as mastered.
///
/// The word leaves the level sets and is not re-added to one, but still
/// counts toward today's learned words.
pub fn master(conn: &Connection, word: &WordEntry) -> StreakState {
  master_on(conn, word, config::today())
}

pub fn master_on(conn: &Connection, word: &WordEntry, today: NaiveDate) -> StreakState {
  db::mark_word_mastered(conn, word.id);
  db::record_today_learned_on(conn, word.id, today);
  tracing::debug!("Mastered {}", word.word);
  db::touch_streak_on(conn, today)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::open_in_memory;
  use crate::domain::Level;
  use crate::testing::word;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
  }

  #[test]
  fn test_advance_marks_seen_and_touches_streak() {
    let conn = open_in_memory().unwrap();
    let w = word(7, "benefit", "好处", Level::Intermediate);

    let streak = advance_on(&conn, &w, day(1));
    assert_eq!(streak.current, 1);
    assert!(db::get_learning_progress(&conn).intermediate.contains(&7));
    assert_eq!(db::get_today_learned_count_on(&conn, day(1)), 1);

    assert_eq!(advance_on(&conn, &w, day(2)).current, 2);
  }

  #[test]
  fn test_master_keeps_sets_disjoint() {
    let conn = open_in_memory().unwrap();
    let w = word(3, "crucial", "关键的", Level::Advanced);

    advance_on(&conn, &w, day(1));
    master_on(&conn, &w, day(1));
    master_on(&conn, &w, day(1));

    let progress = db::get_learning_progress(&conn);
    assert!(progress.mastered.contains(&3));
    assert!(progress.advanced.is_empty());
    assert_eq!(progress.total_tracked(), 1);
    assert_eq!(db::get_today_learned_count_on(&conn, day(1)), 1);
    assert_eq!(db::get_streak(&conn).current, 1);
  }

  #[test]
  fn test_mastered_word_not_reseen() {
    let conn = open_in_memory().unwrap();
    let w = word(4, "derive", "获得", Level::Basic);

    master_on(&conn, &w, day(1));
    advance_on(&conn, &w, day(1));

    let progress = db::get_learning_progress(&conn);
    assert!(progress.basic.is_empty());
    assert!(progress.mastered.contains(&4));
  }
}
