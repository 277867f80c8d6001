//! Learning progress, today's activity and the streak counter

use chrono::NaiveDate;
use rusqlite::Connection;

use super::kv::{read_bucket, write_bucket, Bucket};
use crate::config;
use crate::domain::{DailyActivity, Level, ProgressRecord, StreakState};

pub fn get_learning_progress(conn: &Connection) -> ProgressRecord {
    read_bucket(conn, Bucket::LearningProgress)
}

/// Mark a word as seen at `level` and count it toward today's activity
pub fn mark_word_seen(conn: &Connection, word_id: u32, level: Level) {
    mark_word_seen_on(conn, word_id, level, config::today());
}

pub fn mark_word_seen_on(conn: &Connection, word_id: u32, level: Level, today: NaiveDate) {
    let mut progress = get_learning_progress(conn);
    if progress.mark_seen(word_id, level) {
        write_bucket(conn, Bucket::LearningProgress, &progress);
    }
    record_today_learned_on(conn, word_id, today);
}

/// Move a word into `mastered`. Calling it again changes nothing.
pub fn mark_word_mastered(conn: &Connection, word_id: u32) {
    let mut progress = get_learning_progress(conn);
    let before = progress.clone();
    progress.mark_mastered(word_id);
    if progress != before {
        write_bucket(conn, Bucket::LearningProgress, &progress);
    }
}

pub fn record_today_learned_on(conn: &Connection, word_id: u32, today: NaiveDate) {
    let mut activity: DailyActivity = read_bucket(conn, Bucket::TodayLearned);
    activity.record(word_id, today);
    write_bucket(conn, Bucket::TodayLearned, &activity);
}

pub fn get_today_learned_count(conn: &Connection) -> usize {
    get_today_learned_count_on(conn, config::today())
}

pub fn get_today_learned_count_on(conn: &Connection, today: NaiveDate) -> usize {
    let activity: DailyActivity = read_bucket(conn, Bucket::TodayLearned);
    activity.count_for(today)
}

pub fn get_streak(conn: &Connection) -> StreakState {
    read_bucket(conn, Bucket::Streak)
}

/// Record activity for today. Safe to call any number of times per day.
pub fn touch_streak(conn: &Connection) -> StreakState {
    touch_streak_on(conn, config::today())
}

pub fn touch_streak_on(conn: &Connection, today: NaiveDate) -> StreakState {
    let mut streak = get_streak(conn);
    if streak.touch(today) {
        tracing::debug!("Streak now {} day(s)", streak.current);
        write_bucket(conn, Bucket::Streak, &streak);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_mark_word_seen_persists_and_counts_today() {
        let conn = open_in_memory().unwrap();
        mark_word_seen_on(&conn, 3, Level::Basic, day(1));
        mark_word_seen_on(&conn, 3, Level::Basic, day(1));
        mark_word_seen_on(&conn, 4, Level::Advanced, day(1));

        let progress = get_learning_progress(&conn);
        assert_eq!(progress.basic.len(), 1);
        assert!(progress.advanced.contains(&4));
        assert_eq!(get_today_learned_count_on(&conn, day(1)), 2);
        assert_eq!(get_today_learned_count_on(&conn, day(2)), 0);
    }

    #[test]
    fn test_today_activity_replaced_on_new_day() {
        let conn = open_in_memory().unwrap();
        mark_word_seen_on(&conn, 1, Level::Basic, day(1));
        mark_word_seen_on(&conn, 2, Level::Basic, day(2));
        assert_eq!(get_today_learned_count_on(&conn, day(2)), 1);
    }

    #[test]
    fn test_mark_word_mastered_idempotent() {
        let conn = open_in_memory().unwrap();
        mark_word_seen_on(&conn, 9, Level::Intermediate, day(1));
        mark_word_mastered(&conn, 9);
        let once = get_learning_progress(&conn);
        mark_word_mastered(&conn, 9);
        let twice = get_learning_progress(&conn);

        assert_eq!(once, twice);
        assert!(twice.mastered.contains(&9));
        assert!(twice.intermediate.is_empty());
    }

    #[test]
    fn test_touch_streak_sequence() {
        let conn = open_in_memory().unwrap();
        assert_eq!(touch_streak_on(&conn, day(1)).current, 1);
        assert_eq!(touch_streak_on(&conn, day(1)).current, 1);
        assert_eq!(touch_streak_on(&conn, day(2)).current, 2);
        assert_eq!(touch_streak_on(&conn, day(3)).current, 3);
        assert_eq!(touch_streak_on(&conn, day(5)).current, 1);
        assert_eq!(get_streak(&conn).last_date, Some(day(5)));
    }
}
