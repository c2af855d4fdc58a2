//! Oracle boundary for progression analysis
//!
//! The pipeline only needs text in, text out. `ClaudeOracle` implements that
//! over the Claude Messages API; tests substitute scripted oracles.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

const COACH_SYSTEM_PROMPT: &str =
  "You are a strength training coach. Answer with a single JSON object and nothing else.";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, Serialize)]
pub enum OracleError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Invalid base URL: {0}")]
  InvalidBaseUrl(String),

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

/// Text-in, text-out analysis capability
#[async_trait]
pub trait Oracle: Send + Sync {
  async fn query(&self, prompt: &str) -> Result<String, OracleError>;
}

/// ---------------------------------------------------------------------------
/// Claude API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ClaudeRequest {
  model: String,
  max_tokens: u32,
  system: String,
  messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
  role: String,
  content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
  content: Vec<ContentBlock>,
  usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  content_type: String,
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
  pub input_tokens: u32,
  pub output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
  error: ClaudeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Claude Oracle
/// ---------------------------------------------------------------------------

pub struct ClaudeOracle {
  client: Client,
  api_key: String,
  model: String,
  messages_url: String,
}

impl ClaudeOracle {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_key: api_key.into(),
      model: DEFAULT_MODEL.to_string(),
      messages_url: format!("{}/v1/messages", DEFAULT_BASE_URL),
    }
  }

  /// Create a Claude oracle from the environment.
  ///
  /// `ANTHROPIC_API_KEY` is required; `ANTHROPIC_MODEL` and
  /// `ANTHROPIC_BASE_URL` override the defaults.
  pub fn from_env() -> Result<Self, OracleError> {
    let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| OracleError::MissingApiKey)?;
    let mut oracle = Self::new(api_key);

    if let Ok(model) = std::env::var("ANTHROPIC_MODEL") {
      oracle = oracle.with_model(model);
    }
    if let Ok(base_url) = std::env::var("ANTHROPIC_BASE_URL") {
      oracle = oracle.with_base_url(&base_url)?;
    }

    Ok(oracle)
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }

  /// Point the oracle at another host (proxies, tests)
  pub fn with_base_url(mut self, base_url: &str) -> Result<Self, OracleError> {
    let parsed = Url::parse(base_url)
      .map_err(|e| OracleError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
      return Err(OracleError::InvalidBaseUrl(format!(
        "{}: unsupported scheme {}",
        base_url,
        parsed.scheme()
      )));
    }
    self.messages_url = format!("{}/v1/messages", base_url.trim_end_matches('/'));
    Ok(self)
  }

  pub fn model(&self) -> &str {
    &self.model
  }

  /// Call Claude with a system prompt and user message
  pub async fn complete(
    &self,
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
  ) -> Result<(String, Usage), OracleError> {
    let request = ClaudeRequest {
      model: self.model.clone(),
      max_tokens,
      system: system_prompt.to_string(),
      messages: vec![ClaudeMessage {
        role: "user".to_string(),
        content: user_message.to_string(),
      }],
    };

    let response = self
      .client
      .post(&self.messages_url)
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", API_VERSION)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| OracleError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| OracleError::Request(e.to_string()))?;

    if !status.is_success() {
      if let Ok(error_resp) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
        return Err(OracleError::Api(error_resp.error.message));
      }
      return Err(OracleError::Api(format!("HTTP {}: {}", status, body)));
    }

    let claude_response: ClaudeResponse =
      serde_json::from_str(&body).map_err(|e| OracleError::Parse(e.to_string()))?;

    let text = claude_response
      .content
      .iter()
      .find(|c| c.content_type == "text")
      .and_then(|c| c.text.clone())
      .ok_or_else(|| OracleError::Parse("No text content in response".to_string()))?;

    Ok((text, claude_response.usage))
  }
}

#[async_trait]
impl Oracle for ClaudeOracle {
  async fn query(&self, prompt: &str) -> Result<String, OracleError> {
    let (text, usage) = self.complete(COACH_SYSTEM_PROMPT, prompt, MAX_TOKENS).await?;
    debug!(
      model = %self.model,
      input_tokens = usage.input_tokens,
      output_tokens = usage.output_tokens,
      "Oracle call complete"
    );
    Ok(text)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
