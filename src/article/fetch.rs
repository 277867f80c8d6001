//! Page download through public CORS proxies

use std::future::Future;
use std::time::Duration;

use crate::config::{self, AppConfig};
use crate::error::ArticleError;

/// Something that returns raw markup for a URL
pub trait PageSource: Send + Sync {
  fn name(&self) -> &str;

  fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ArticleError>> + Send;
}

/// Fetches through a proxy whose template contains `{url}`
pub struct ProxySource {
  client: reqwest::Client,
  template: String,
  timeout: Duration,
}

impl ProxySource {
  pub fn new(template: &str, timeout: Duration) -> Self {
    Self {
      client: reqwest::Client::new(),
      template: template.to_string(),
      timeout,
    }
  }

  /// One source per configured proxy, in order
  pub fn from_config(config: &AppConfig) -> Vec<Self> {
    config
      .fetch_proxies
      .iter()
      .map(|template| Self::new(template, config.fetch_timeout))
      .collect()
  }

  pub fn proxied_url(&self, url: &str) -> String {
    self.template.replace("{url}", &urlencoding::encode(url))
  }

  async fn request(&self, url: &str) -> Result<String, ArticleError> {
    let response = self
      .client
      .get(self.proxied_url(url))
      .send()
      .await
      .map_err(|e| ArticleError::FetchFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(ArticleError::FetchFailed(format!("{} answered {}", self.name(), status)));
    }

    response
      .text()
      .await
      .map_err(|e| ArticleError::FetchFailed(e.to_string()))
  }
}

impl PageSource for ProxySource {
  fn name(&self) -> &str {
    &self.template
  }

  async fn fetch(&self, url: &str) -> Result<String, ArticleError> {
    tokio::time::timeout(self.timeout, self.request(url))
      .await
      .map_err(|_| ArticleError::FetchFailed(format!("timed out after {:?}", self.timeout)))?
  }
}

/// Try each source in order. A body longer than `MIN_PAGE_CHARS` wins
/// immediately; otherwise the last non-empty body is used.
pub async fn fetch_page<S: PageSource>(sources: &[S], url: &str) -> Result<String, ArticleError> {
  let mut html = String::new();
  let mut last_error = None;

  for source in sources {
    match source.fetch(url).await {
      Ok(body) if body.chars().count() > config::MIN_PAGE_CHARS => return Ok(body),
      Ok(body) => {
        tracing::debug!("{} returned only {} bytes", source.name(), body.len());
        if !body.trim().is_empty() {
          html = body;
        }
      }
      Err(e) => {
        tracing::warn!("Fetch via {} failed: {}", source.name(), e);
        last_error = Some(e);
      }
    }
  }

  if html.is_empty() {
    return Err(last_error.unwrap_or_else(|| ArticleError::FetchFailed("no content returned".into())));
  }
  Ok(html)
}

#[cfg(test)]
pub(crate) mod stub {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::PageSource;
  use crate::error::ArticleError;

  /// Canned response with a call counter
  pub struct StubSource {
    pub name: String,
    pub response: Result<String, ArticleError>,
    pub calls: AtomicUsize,
  }

  impl StubSource {
    pub fn ok(name: &str, body: &str) -> Self {
      Self {
        name: name.to_string(),
        response: Ok(body.to_string()),
        calls: AtomicUsize::new(0),
      }
    }

    pub fn failing(name: &str) -> Self {
      Self {
        name: name.to_string(),
        response: Err(ArticleError::FetchFailed(format!("{} is down", name))),
        calls: AtomicUsize::new(0),
      }
    }

    pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  impl PageSource for StubSource {
    fn name(&self) -> &str {
      &self.name
    }

    async fn fetch(&self, _url: &str) -> Result<String, ArticleError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.response.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::stub::StubSource;
  use super::*;

  #[test]
  fn test_proxied_url_encodes_target() {
    let source = ProxySource::new(config::FETCH_PROXIES[0], config::FETCH_TIMEOUT);
    assert_eq!(
      source.proxied_url("https://example.com/a?b=1"),
      "https://api.allorigins.win/raw?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1"
    );
  }

  #[tokio::test]
  async fn test_first_long_body_wins() {
    let long = "x".repeat(200);
    let sources = [StubSource::ok("a", &long), StubSource::ok("b", "other")];
    assert_eq!(fetch_page(&sources, "https://example.com").await, Ok(long));
    assert_eq!(sources[1].calls(), 0);
  }

  #[tokio::test]
  async fn test_falls_through_failures() {
    let long = "y".repeat(150);
    let sources = [StubSource::failing("a"), StubSource::ok("b", &long)];
    assert_eq!(fetch_page(&sources, "https://example.com").await, Ok(long));
  }

  #[tokio::test]
  async fn test_short_body_kept_when_nothing_better() {
    let sources = [StubSource::ok("a", "<p>short</p>"), StubSource::ok("b", "")];
    assert_eq!(fetch_page(&sources, "https://example.com").await, Ok("<p>short</p>".to_string()));
    assert_eq!(sources[1].calls(), 1);
  }

  #[tokio::test]
  async fn test_all_failing_reports_last_error() {
    let sources = [StubSource::failing("a"), StubSource::failing("b")];
    assert_eq!(
      fetch_page(&sources, "https://example.com").await,
      Err(ArticleError::FetchFailed("b is down".into()))
    );
  }

  #[tokio::test]
  async fn test_empty_bodies_without_errors() {
    let sources = [StubSource::ok("a", "")];
    assert!(matches!(fetch_page(&sources, "https://example.com").await, Err(ArticleError::FetchFailed(_))));
  }
}
