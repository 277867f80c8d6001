//! Application configuration constants.
//!
//! Tunables for the quiz, the translation client and the article importer
//! live here, together with the `config.toml` / environment loader.

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

// ==================== Quiz Configuration ====================

/// Questions per practice session
pub const QUIZ_SIZE: usize = 10;

/// Number of distractor choices in multiple choice questions
pub const DISTRACTOR_COUNT: usize = 3;

// ==================== Translation Configuration ====================

/// Remote translation endpoint (MyMemory)
pub const TRANSLATE_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Source|target language pair sent with each request
pub const TRANSLATE_LANGPAIR: &str = "en|zh";

/// Upper bound for a single translation call
pub const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Marker prepended to the input when a translation is unavailable
pub const TRANSLATE_FALLBACK_PREFIX: &str = "[untranslated] ";

/// Default in-flight requests per batch wave
pub const BATCH_CONCURRENCY: usize = 3;

/// Minimum gap between two cache writes to the store
pub const CACHE_PERSIST_INTERVAL: Duration = Duration::from_secs(1);

// ==================== Article Configuration ====================

/// CORS proxies tried in order; `{url}` is replaced by the encoded target
pub const FETCH_PROXIES: [&str; 2] = [
  "https://api.allorigins.win/raw?url={url}",
  "https://corsproxy.io/?{url}",
];

/// Upper bound for a single page fetch
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// A fetched body longer than this stops the proxy loop
pub const MIN_PAGE_CHARS: usize = 100;

/// Blocks at or under this length are treated as menu fragments
pub const MIN_BLOCK_CHARS: usize = 10;

/// Block extraction below this length falls back to flattened text
pub const MIN_BODY_CHARS: usize = 100;

/// Extracted articles shorter than this are rejected
pub const MIN_ARTICLE_CHARS: usize = 20;

// ==================== Speech Configuration ====================

/// Playback rates offered by the reader
pub const SPEECH_RATES: [f32; 4] = [0.5, 0.75, 1.0, 1.5];

/// Rate for pronouncing a single tapped word
pub const WORD_SPEECH_RATE: f32 = 0.8;

/// Local calendar day used for streaks and daily counters
pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

// ==================== Runtime Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  database: Option<DatabaseSection>,
  translation: Option<TranslationSection>,
  articles: Option<ArticleSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
  path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslationSection {
  endpoint: Option<String>,
  langpair: Option<String>,
  timeout_secs: Option<u64>,
  concurrency: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleSection {
  proxies: Option<Vec<String>>,
  timeout_secs: Option<u64>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub database_path: PathBuf,
  pub translate_endpoint: String,
  pub translate_langpair: String,
  pub translate_timeout: Duration,
  pub batch_concurrency: usize,
  pub fetch_proxies: Vec<String>,
  pub fetch_timeout: Duration,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_path: PathBuf::from(crate::paths::db_path()),
      translate_endpoint: TRANSLATE_ENDPOINT.to_string(),
      translate_langpair: TRANSLATE_LANGPAIR.to_string(),
      translate_timeout: TRANSLATE_TIMEOUT,
      batch_concurrency: BATCH_CONCURRENCY,
      fetch_proxies: FETCH_PROXIES.iter().map(|p| p.to_string()).collect(),
      fetch_timeout: FETCH_TIMEOUT,
    }
  }
}

impl AppConfig {
  /// Load configuration with priority: config.toml > .env / environment > defaults
  pub fn load() -> Self {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let mut config = Self::default();
    config.apply_env();

    match Self::read_file(Path::new("config.toml")) {
      Ok(Some(file)) => {
        tracing::info!("Using settings from config.toml");
        config.apply_file(file);
      }
      Ok(None) => {}
      Err(e) => tracing::warn!("Ignoring config.toml: {}", e),
    }

    tracing::debug!("Using database at {}", config.database_path.display());
    config
  }

  /// Defaults overlaid with a TOML document
  pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
    let file: ConfigFile = toml::from_str(contents)?;
    let mut config = Self::default();
    config.apply_file(file);
    Ok(config)
  }

  fn read_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
      return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.display().to_string(),
      source,
    })?;
    Ok(Some(toml::from_str(&contents)?))
  }

  fn apply_env(&mut self) {
    if let Ok(path) = std::env::var("DATABASE_PATH") {
      self.database_path = PathBuf::from(path);
    }
    if let Ok(endpoint) = std::env::var("TRANSLATE_ENDPOINT") {
      self.translate_endpoint = endpoint;
    }
    if let Ok(langpair) = std::env::var("TRANSLATE_LANGPAIR") {
      self.translate_langpair = langpair;
    }
  }

  fn apply_file(&mut self, file: ConfigFile) {
    if let Some(path) = file.database.and_then(|db| db.path) {
      self.database_path = PathBuf::from(path);
    }

    if let Some(t) = file.translation {
      if let Some(endpoint) = t.endpoint {
        self.translate_endpoint = endpoint;
      }
      if let Some(langpair) = t.langpair {
        self.translate_langpair = langpair;
      }
      if let Some(secs) = t.timeout_secs {
        self.translate_timeout = Duration::from_secs(secs);
      }
      if let Some(n) = t.concurrency {
        self.batch_concurrency = n.max(1);
      }
    }

    if let Some(a) = file.articles {
      if let Some(proxies) = a.proxies.filter(|p| !p.is_empty()) {
        self.fetch_proxies = proxies;
      }
      if let Some(secs) = a.timeout_secs {
        self.fetch_timeout = Duration::from_secs(secs);
      }
    }
  }
}
