//! [`Lookup`] backed by the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use reagent_core::lookup::{Lookup, LookupError};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::LookupConfig;

/// Async client for the hosted lookup service.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiLookup {
  client:   Client,
  api_key:  Option<String>,
  model:    String,
  endpoint: String,
}

impl GeminiLookup {
  pub fn new(config: &LookupConfig) -> reqwest::Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty());
    if api_key.is_none() {
      tracing::warn!("lookup API key not configured; lookups are disabled");
    }
    Ok(Self {
      client,
      api_key,
      model: config.model.clone(),
      endpoint: config.endpoint.clone(),
    })
  }

  fn url(&self) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.endpoint.trim_end_matches('/'),
      self.model
    )
  }

  async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, LookupError> {
    let body = json!({
      "contents": [{ "parts": [{ "text": prompt }] }],
      "generationConfig": { "temperature": 0.5, "topK": 32, "topP": 1 },
    });

    let resp = self
      .client
      .post(self.url())
      .header("x-goog-api-key", api_key)
      .json(&body)
      .send()
      .await
      .map_err(|e| LookupError::Unavailable(e.to_string()))?;

    if !resp.status().is_success() {
      return Err(LookupError::Unavailable(format!("generateContent → {}", resp.status())));
    }

    let parsed: GenerateResponse = resp
      .json()
      .await
      .map_err(|e| LookupError::Unavailable(format!("deserialising response: {e}")))?;
    extract_text(parsed).ok_or_else(|| LookupError::Unavailable("response had no text".into()))
  }
}

impl Lookup for GeminiLookup {
  async fn explain(&self, prompt: String) -> Result<String, LookupError> {
    let Some(api_key) = self.api_key.as_deref() else {
      return Err(LookupError::NotConfigured);
    };
    self.generate(api_key, &prompt).await
  }
}

// ─── Response ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
  text: Option<String>,
}

/// Concatenated text of the first candidate, if it has any.
fn extract_text(resp: GenerateResponse) -> Option<String> {
  let text: String = resp
    .candidates
    .into_iter()
    .next()?
    .content
    .parts
    .into_iter()
    .filter_map(|p| p.text)
    .collect();
  (!text.trim().is_empty()).then_some(text)
}
