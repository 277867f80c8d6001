//! Aggregate statistics for the dashboard

use chrono::NaiveDate;
use rusqlite::Connection;

use super::practice::get_practice_history;
use super::progress::{get_learning_progress, get_streak, get_today_learned_count_on};
use crate::config;
use crate::domain::Stats;

pub fn compute_stats(conn: &Connection) -> Stats {
    compute_stats_on(conn, config::today())
}

pub fn compute_stats_on(conn: &Connection, today: NaiveDate) -> Stats {
    let progress = get_learning_progress(conn);
    let today_accuracy = get_practice_history(conn)
        .iter()
        .find(|entry| entry.date == today)
        .and_then(|entry| entry.accuracy());

    Stats {
        total_words_learned: progress.total_tracked(),
        today_words_learned: get_today_learned_count_on(conn, today),
        streak: get_streak(conn).current,
        today_accuracy,
    }
}
