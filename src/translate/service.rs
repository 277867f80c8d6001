//! Cached single-text translation

use super::cache::TranslationCache;
use super::client::RemoteTranslator;
use crate::config;

/// Translator front end: answers from the cache, falls back to the remote
/// collaborator, and never fails.
pub struct TranslationService<T> {
  remote: T,
  cache: TranslationCache,
}

impl<T: RemoteTranslator> TranslationService<T> {
  pub fn new(remote: T, cache: TranslationCache) -> Self {
    Self { remote, cache }
  }

  pub fn cache(&self) -> &TranslationCache {
    &self.cache
  }

  pub fn remote(&self) -> &T {
    &self.remote
  }

  /// Translate one text.
  ///
  /// Blank input gives an empty string. A failed remote call gives the
  /// input behind `TRANSLATE_FALLBACK_PREFIX`; fallbacks are not cached.
  pub async fn translate_one(&self, text: &str) -> String {
    if text.trim().is_empty() {
      return String::new();
    }
    if let Some(cached) = self.cache.get(text) {
      return cached;
    }

    match self.remote.translate(text).await {
      Ok(translated) => {
        self.cache.insert(text, &translated);
        translated
      }
      Err(e) => {
        tracing::warn!("Translation failed, using fallback: {}", e);
        fallback(text)
      }
    }
  }
}

pub fn fallback(text: &str) -> String {
  format!("{}{}", config::TRANSLATE_FALLBACK_PREFIX, text)
}

#[cfg(test)]
pub(crate) mod stub {
  use std::collections::HashSet;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;
  use std::time::Duration;

  use super::RemoteTranslator;
  use crate::error::TranslateError;

  /// Deterministic translator: `zh(<text>)`, with per-text delays and
  /// call accounting.
  #[derive(Default)]
  pub struct StubTranslator {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub failing: Mutex<HashSet<String>>,
    /// Delay in milliseconds per text; unlisted texts answer at once
    pub delays: Vec<(String, u64)>,
  }

  impl StubTranslator {
    pub fn with_delays(delays: &[(&str, u64)]) -> Self {
      Self {
        delays: delays.iter().map(|(t, ms)| (t.to_string(), *ms)).collect(),
        ..Self::default()
      }
    }

    pub fn fail_on(&self, text: &str) {
      self.failing.lock().unwrap().insert(text.to_string());
    }

    pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  impl RemoteTranslator for StubTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
      self.max_in_flight.fetch_max(now, Ordering::SeqCst);

      let delay = self.delays.iter().find(|(t, _)| t == text).map(|(_, ms)| *ms).unwrap_or(0);
      tokio::time::sleep(Duration::from_millis(delay)).await;

      self.in_flight.fetch_sub(1, Ordering::SeqCst);
      if self.failing.lock().unwrap().contains(text) {
        return Err(TranslateError::Status(500));
      }
      Ok(format!("zh({})", text))
    }
  }
}
