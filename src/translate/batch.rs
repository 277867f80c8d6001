//! Ordered batch translation with bounded fan-out.
//!
//! Cached texts are reported first. The rest go out in waves of at most
//! `concurrency` requests; each wave finishes before the next starts, and
//! cancellation is checked before every wave. A text repeated in the batch
//! is requested once and its result reported at every position.

use std::collections::HashMap;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;

use super::client::RemoteTranslator;
use super::service::TranslationService;
use crate::config::{self, AppConfig};

#[derive(Debug, Clone)]
pub struct BatchOptions {
  /// Requests in flight per wave (at least 1)
  pub concurrency: usize,
  /// Stops further waves once cancelled; in-flight requests still finish
  pub cancel: CancellationToken,
}

impl Default for BatchOptions {
  fn default() -> Self {
    Self {
      concurrency: config::BATCH_CONCURRENCY,
      cancel: CancellationToken::new(),
    }
  }
}

impl BatchOptions {
  /// Options with the configured fan-out and a fresh cancellation token
  pub fn from_config(config: &AppConfig) -> Self {
    Self {
      concurrency: config.batch_concurrency.max(1),
      ..Self::default()
    }
  }
}

impl<T: RemoteTranslator> TranslationService<T> {
  /// Translate `texts`, reporting each result through `on_each(index, text)`
  /// as it becomes available (completion order, not input order).
  ///
  /// The returned vector is aligned with `texts`; entries skipped because
  /// of cancellation are `None`.
  pub async fn translate_batch<S, F>(&self, texts: &[S], options: BatchOptions, mut on_each: F) -> Vec<Option<String>>
  where
    S: AsRef<str>,
    F: FnMut(usize, &str),
  {
    let mut results: Vec<Option<String>> = vec![None; texts.len()];
    // Uncached texts in first-seen order, each with every index it occupies
    let mut pending: Vec<(&str, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (idx, text) in texts.iter().enumerate() {
      let text = text.as_ref();
      if let Some(&pos) = positions.get(text) {
        pending[pos].1.push(idx);
        continue;
      }
      match self.cache().get(text) {
        Some(cached) => {
          on_each(idx, &cached);
          results[idx] = Some(cached);
        }
        None => {
          positions.insert(text, pending.len());
          pending.push((text, vec![idx]));
        }
      }
    }

    let waiting: usize = pending.iter().map(|(_, indices)| indices.len()).sum();
    tracing::debug!(
      "Batch of {}: {} cached, {} unique texts to translate",
      texts.len(),
      texts.len() - waiting,
      pending.len()
    );

    let mut started = 0;
    for wave in pending.chunks(options.concurrency.max(1)) {
      if options.cancel.is_cancelled() {
        tracing::debug!("Batch cancelled with {} unique texts left", pending.len() - started);
        break;
      }
      started += wave.len();

      let mut in_flight: FuturesUnordered<_> = wave
        .iter()
        .map(|(text, indices)| async move { (indices, self.translate_one(text).await) })
        .collect();

      while let Some((indices, translated)) = in_flight.next().await {
        for &idx in indices {
          on_each(idx, &translated);
          results[idx] = Some(translated.clone());
        }
      }
    }

    results
  }
}
