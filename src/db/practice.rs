//! Wrong-answer book and per-day practice history

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;

use super::kv::{read_bucket, write_bucket, Bucket};
use crate::config;
use crate::domain::{PracticeHistoryEntry, WrongAnswerEntry};

pub fn get_wrong_answers(conn: &Connection) -> Vec<WrongAnswerEntry> {
    read_bucket(conn, Bucket::WrongAnswers)
}

/// Create or bump the entry for `word_id`. Returns the new miss count.
pub fn record_wrong_answer(conn: &Connection, word_id: u32, word: &str, meaning: &str) -> u32 {
    record_wrong_answer_at(conn, word_id, word, meaning, Utc::now())
}

pub fn record_wrong_answer_at(
    conn: &Connection,
    word_id: u32,
    word: &str,
    meaning: &str,
    now: DateTime<Utc>,
) -> u32 {
    let mut list = get_wrong_answers(conn);

    let count = match list.iter_mut().find(|e| e.word_id == word_id) {
        Some(existing) => {
            existing.wrong_count += 1;
            existing.last_wrong = now;
            existing.wrong_count
        }
        None => {
            list.push(WrongAnswerEntry {
                word_id,
                word: word.to_string(),
                meaning: meaning.to_string(),
                wrong_count: 1,
                last_wrong: now,
            });
            1
        }
    };

    write_bucket(conn, Bucket::WrongAnswers, &list);
    count
}

/// Drop the entry for `word_id`. Returns true if one existed.
pub fn clear_wrong_answer(conn: &Connection, word_id: u32) -> bool {
    let mut list = get_wrong_answers(conn);
    let before = list.len();
    list.retain(|e| e.word_id != word_id);
    if list.len() == before {
        return false;
    }
    write_bucket(conn, Bucket::WrongAnswers, &list);
    true
}

pub fn get_practice_history(conn: &Connection) -> Vec<PracticeHistoryEntry> {
    read_bucket(conn, Bucket::PracticeHistory)
}

/// History for display, most recent day first
pub fn get_recent_practice_history(conn: &Connection) -> Vec<PracticeHistoryEntry> {
    let mut history = get_practice_history(conn);
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

/// Add a finished session's numbers into today's entry
pub fn record_session_result(conn: &Connection, total: u32, correct: u32, wrong: u32) {
    record_session_result_on(conn, total, correct, wrong, config::today());
}

pub fn record_session_result_on(
    conn: &Connection,
    total: u32,
    correct: u32,
    wrong: u32,
    today: NaiveDate,
) {
    let mut history = get_practice_history(conn);

    match history.iter_mut().find(|e| e.date == today) {
        Some(entry) => {
            entry.total += total;
            entry.correct += correct;
            entry.wrong += wrong;
        }
        None => history.push(PracticeHistoryEntry {
            date: today,
            total,
            correct,
            wrong,
        }),
    }

    write_bucket(conn, Bucket::PracticeHistory, &history);
}
