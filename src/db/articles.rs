//! Imported articles

use chrono::Utc;
use rusqlite::Connection;

use super::kv::{read_bucket, write_bucket, Bucket};
use crate::domain::Article;

pub fn get_articles(conn: &Connection) -> Vec<Article> {
    read_bucket(conn, Bucket::Articles)
}

pub fn get_article(conn: &Connection, id: &str) -> Option<Article> {
    get_articles(conn).into_iter().find(|a| a.id == id)
}

/// Append an article, generating an id from the current time
pub fn save_article(conn: &Connection, title: &str, content: &str) -> Article {
    let mut articles = get_articles(conn);
    let now = Utc::now();

    // Millisecond ids can collide when importing in a tight loop
    let mut millis = now.timestamp_millis();
    while articles.iter().any(|a| a.id == millis.to_string()) {
        millis += 1;
    }

    let article = Article {
        id: millis.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
    };
    articles.push(article.clone());
    write_bucket(conn, Bucket::Articles, &articles);
    article
}

pub fn delete_article(conn: &Connection, id: &str) -> bool {
    let mut articles = get_articles(conn);
    let before = articles.len();
    articles.retain(|a| a.id != id);
    if articles.len() == before {
        return false;
    }
    write_bucket(conn, Bucket::Articles, &articles);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_save_and_delete_article() {
        let conn = open_in_memory().unwrap();
        let first = save_article(&conn, "One", "Body one.");
        let second = save_article(&conn, "Two", "Body two.");
        assert_ne!(first.id, second.id);
        assert_eq!(get_articles(&conn).len(), 2);

        assert_eq!(get_article(&conn, &second.id).map(|a| a.title), Some("Two".to_string()));
        assert!(delete_article(&conn, &first.id));
        assert!(!delete_article(&conn, &first.id));
        assert_eq!(get_articles(&conn).len(), 1);
    }
}
