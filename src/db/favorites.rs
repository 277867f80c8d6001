//! Favorite words (the learner's own word list)

use chrono::Utc;
use rusqlite::Connection;

use super::kv::{read_bucket, write_bucket, Bucket};
use crate::domain::FavoriteWord;

pub fn get_favorites(conn: &Connection) -> Vec<FavoriteWord> {
    read_bucket(conn, Bucket::Favorites)
}

pub fn is_favorite(conn: &Connection, word: &str) -> bool {
    get_favorites(conn).iter().any(|f| f.word == word)
}

/// Add a word unless the headword is already listed. Returns true if added.
pub fn add_favorite(conn: &Connection, word: &str, meaning: &str, phonetic: &str, pos: &str) -> bool {
    let mut favorites = get_favorites(conn);
    if favorites.iter().any(|f| f.word == word) {
        return false;
    }

    favorites.push(FavoriteWord {
        word: word.to_string(),
        meaning: meaning.to_string(),
        phonetic: phonetic.to_string(),
        pos: pos.to_string(),
        added_at: Utc::now(),
    });
    write_bucket(conn, Bucket::Favorites, &favorites);
    true
}

pub fn remove_favorite(conn: &Connection, word: &str) -> bool {
    let mut favorites = get_favorites(conn);
    let before = favorites.len();
    favorites.retain(|f| f.word != word);
    if favorites.len() == before {
        return false;
    }
    write_bucket(conn, Bucket::Favorites, &favorites);
    true
}

/// Add when absent, remove when present. Returns the new favorite state.
pub fn toggle_favorite(conn: &Connection, word: &str, meaning: &str) -> bool {
    if remove_favorite(conn, word) {
        false
    } else {
        add_favorite(conn, word, meaning, "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_add_favorite_dedupes_by_word() {
        let conn = open_in_memory().unwrap();
        assert!(add_favorite(&conn, "benefit", "好处", "/ˈbenɪfɪt/", "n."));
        assert!(!add_favorite(&conn, "benefit", "另一个意思", "", ""));

        let favorites = get_favorites(&conn);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].meaning, "好处");
        assert!(is_favorite(&conn, "benefit"));
    }

    #[test]
    fn test_remove_favorite() {
        let conn = open_in_memory().unwrap();
        add_favorite(&conn, "a", "", "", "");
        add_favorite(&conn, "b", "", "", "");
        assert!(remove_favorite(&conn, "a"));
        assert!(!remove_favorite(&conn, "a"));
        assert!(!is_favorite(&conn, "a"));
        assert!(is_favorite(&conn, "b"));
    }

    #[test]
    fn test_toggle_favorite() {
        let conn = open_in_memory().unwrap();
        assert!(toggle_favorite(&conn, "crucial", "关键的"));
        assert!(is_favorite(&conn, "crucial"));
        assert!(!toggle_favorite(&conn, "crucial", "关键的"));
        assert!(!is_favorite(&conn, "crucial"));
    }
}
