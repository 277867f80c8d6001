//! Reading articles: import from pasted text or a web page, and helpers
//! for the reader view.

pub mod extract;
pub mod fetch;
pub mod reader;

pub use extract::{extract_content, ExtractedPage};
pub use fetch::{fetch_page, PageSource, ProxySource};
pub use reader::{clean_word, split_sentences};

use rusqlite::Connection;

use crate::config;
use crate::db::{self, DbPool};
use crate::domain::Article;
use crate::error::ArticleError;
use crate::validation::{parse_article_url, validate_import_text};

/// Title used when the learner leaves it blank
fn default_title(conn: &Connection) -> String {
  format!("Article {}", db::get_articles(conn).len() + 1)
}

/// Save pasted text as an article
pub fn import_text(conn: &Connection, title: &str, text: &str) -> Result<Article, ArticleError> {
  let content = validate_import_text(text)?;
  let title = match title.trim() {
    "" => default_title(conn),
    t => t.to_string(),
  };
  Ok(db::save_article(conn, &title, content))
}

/// Title suggested for an uploaded text file: the name without extension
pub fn title_from_file_name(file_name: &str) -> &str {
  match file_name.rsplit_once('.') {
    Some((stem, ext)) if !stem.is_empty() && is_extension(ext) => stem,
    _ => file_name,
  }
}

fn is_extension(ext: &str) -> bool {
  !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Download and extract a page without saving it.
///
/// The URL is validated before any network attempt.
pub async fn fetch_article<S: PageSource>(sources: &[S], url: &str) -> Result<ExtractedPage, ArticleError> {
  let url = parse_article_url(url)?;
  let html = fetch_page(sources, url.as_str()).await?;

  let page = extract_content(&html);
  if page.content.chars().count() < config::MIN_ARTICLE_CHARS {
    tracing::info!("Only {} chars extracted from {}", page.content.chars().count(), url);
    return Err(ArticleError::TooLittleContent);
  }
  Ok(page)
}

/// Fetch, extract and save an article from the web
pub async fn import_from_url<S: PageSource>(pool: &DbPool, sources: &[S], url: &str) -> Result<Article, ArticleError> {
  let page = fetch_article(sources, url).await?;

  let conn = db::try_lock(pool).map_err(|_| ArticleError::StoreUnavailable)?;
  let title = match page.title.trim() {
    "" => default_title(&conn),
    t => t.to_string(),
  };
  let article = db::save_article(&conn, &title, &page.content);
  tracing::info!("Imported article {} ({} chars)", article.id, article.content.len());
  Ok(article)
}
