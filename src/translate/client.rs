//! Remote translation collaborator (MyMemory HTTP API)

use std::future::Future;
use std::time::Duration;

use html_escape::decode_html_entities;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::TranslateError;

/// Something that can translate one piece of text remotely.
///
/// Implementations report every failure as an error; the translation
/// service turns those into fallback strings.
pub trait RemoteTranslator: Send + Sync {
  fn translate(&self, text: &str) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

pub struct MyMemoryClient {
  client: reqwest::Client,
  endpoint: String,
  langpair: String,
  timeout: Duration,
}

impl MyMemoryClient {
  pub fn new(config: &AppConfig) -> Self {
    Self {
      client: reqwest::Client::new(),
      endpoint: config.translate_endpoint.clone(),
      langpair: config.translate_langpair.clone(),
      timeout: config.translate_timeout,
    }
  }

  async fn request(&self, text: &str) -> Result<String, TranslateError> {
    let response = self
      .client
      .get(&self.endpoint)
      .query(&[("q", text), ("langpair", self.langpair.as_str())])
      .send()
      .await?;
    let body: Value = response.json().await?;
    parse_response(&body)
  }
}

impl RemoteTranslator for MyMemoryClient {
  async fn translate(&self, text: &str) -> Result<String, TranslateError> {
    tokio::time::timeout(self.timeout, self.request(text))
      .await
      .map_err(|_| TranslateError::Timeout(self.timeout))?
  }
}

/// Pull the translated text out of a MyMemory response body.
///
/// `responseStatus` arrives as a number or a numeric string depending on
/// the code path on the server side.
pub fn parse_response(body: &Value) -> Result<String, TranslateError> {
  let status = match &body["responseStatus"] {
    Value::Number(n) => n.as_u64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
  .ok_or_else(|| TranslateError::Malformed("missing responseStatus".into()))?;

  if status != 200 {
    return Err(TranslateError::Status(status));
  }

  let translated = body["responseData"]["translatedText"]
    .as_str()
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or_else(|| TranslateError::Malformed("missing translatedText".into()))?;

  Ok(decode_html_entities(translated).to_string())
}
