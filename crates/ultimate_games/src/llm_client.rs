//! LLM API client abstraction for OpenAI and Anthropic.

use derive_more::{Display, Error};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const OPENAI_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_PATH: &str = "/v1/messages";
const OPENAI_PATH: &str = "/v1/chat/completions";
const ANTHROPIC_WEB_SEARCH_TOOL: &str = "web_search_20250305";
const WEB_SEARCH_MAX_USES: u32 = 3;

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

/// Configuration for LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
    max_retries: u32,
    initial_backoff: Duration,
    base_url: Option<String>,
    web_search: bool,
}

impl LlmConfig {
    /// Creates a new LLM configuration with no retries.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            base_url: None,
            web_search: false,
        }
    }

    /// Retries failed requests up to `max_retries` times, doubling the
    /// delay from `initial_backoff` each time.
    pub fn with_retry(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    /// Sends requests to `base_url` (scheme and host, no path) instead of
    /// the provider's public endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Lets the model search the web and cite what it finds.
    ///
    /// Anthropic gets the server-side web search tool. OpenAI gets
    /// `web_search_options`, which only search-enabled chat models accept
    /// (e.g. `gpt-4o-mini-search-preview`). Without search, neither provider
    /// returns citations.
    pub fn with_web_search(mut self, web_search: bool) -> Self {
        self.web_search = web_search;
        self
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Gets the retry limit.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns true if web search is requested.
    pub fn web_search(&self) -> bool {
        self.web_search
    }

    /// Full URL of the provider's completion endpoint.
    pub fn endpoint(&self) -> String {
        let (default_base, path) = match self.provider {
            LlmProvider::OpenAI => (OPENAI_BASE_URL, OPENAI_PATH),
            LlmProvider::Anthropic => (ANTHROPIC_BASE_URL, ANTHROPIC_PATH),
        };
        let base = self.base_url.as_deref().unwrap_or(default_base);
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}

/// A source the model cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Page title, when the provider reports one.
    pub title: Option<String>,
    /// Source URL.
    pub url: String,
}

/// Text generated by the model plus any citations attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Cited sources, possibly empty.
    pub citations: Vec<Citation>,
}

/// Delay before retry number `attempt` (0-based).
pub fn backoff_delay(initial: Duration, attempt: u32) -> Duration {
    initial.saturating_mul(2u32.saturating_pow(attempt))
}

/// Rate limiting and server errors are worth retrying; other failures are not.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

enum Failure {
    Retryable(LlmError),
    Fatal(LlmError),
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client on top of an existing HTTP client.
    #[instrument(skip(config, http), fields(provider = ?config.provider()))]
    pub fn with_http_client(config: LlmConfig, http: reqwest::Client) -> Self {
        info!("Creating LLM client");
        Self { config, http }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(
        skip(self, system_prompt, user_message),
        fields(provider = ?self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, LlmError> {
        debug!("Generating completion");
        let url = self.config.endpoint();
        let body = self.request_body(system_prompt, user_message);
        let json = self.send_with_retry(&url, &body).await?;
        let completion = match self.config.provider {
            LlmProvider::OpenAI => parse_openai(&json)?,
            LlmProvider::Anthropic => parse_anthropic(&json)?,
        };
        info!(
            content_length = completion.text.len(),
            citations = completion.citations.len(),
            "Generated completion"
        );
        Ok(completion)
    }

    /// JSON request body for the configured provider.
    pub fn request_body(&self, system_prompt: &str, user_message: &str) -> serde_json::Value {
        match self.config.provider {
            LlmProvider::OpenAI => self.openai_body(system_prompt, user_message),
            LlmProvider::Anthropic => self.anthropic_body(system_prompt, user_message),
        }
    }

    fn anthropic_body(&self, system_prompt: &str, user_message: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_message
                }
            ]
        });
        if self.config.web_search {
            body["tools"] = serde_json::json!([{
                "type": ANTHROPIC_WEB_SEARCH_TOOL,
                "name": "web_search",
                "max_uses": WEB_SEARCH_MAX_USES
            }]);
        }
        body
    }

    fn openai_body(&self, system_prompt: &str, user_message: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message }
            ]
        });
        if self.config.web_search {
            body["web_search_options"] = serde_json::json!({});
        }
        body
    }

    /// Posts the body, retrying with exponential backoff.
    #[instrument(skip(self, body))]
    async fn send_with_retry(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let mut attempt = 0;
        loop {
            match self.send_once(url, body).await {
                Ok(json) => return Ok(json),
                Err(Failure::Retryable(e)) if attempt < self.config.max_retries => {
                    let delay = backoff_delay(self.config.initial_backoff, attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e.message,
                        "Retrying LLM request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(Failure::Retryable(e)) | Err(Failure::Fatal(e)) => return Err(e),
            }
        }
    }

    async fn send_once(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, Failure> {
        let request = self.http.post(url).json(body);
        let request = match self.config.provider {
            LlmProvider::Anthropic => request
                .header("x-api-key", self.config.api_key.clone())
                .header("anthropic-version", "2023-06-01"),
            LlmProvider::OpenAI => request.bearer_auth(&self.config.api_key),
        };

        debug!("Sending request");
        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "LLM API request failed");
            Failure::Retryable(LlmError::new(format!("API request failed: {}", e)))
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read LLM response");
            Failure::Retryable(LlmError::new(format!("Failed to read response: {}", e)))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "LLM API error");
            let err = LlmError::new(format!("API error {}: {}", status, response_text));
            return Err(if is_retryable_status(status) {
                Failure::Retryable(err)
            } else {
                Failure::Fatal(err)
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!(error = ?e, response = %response_text, "Failed to parse LLM response");
            Failure::Fatal(LlmError::new(format!("Failed to parse response: {}", e)))
        })
    }
}

/// Extracts text and citations from an Anthropic messages response.
///
/// All text blocks are concatenated; each block may carry `citations`.
pub fn parse_anthropic(json: &serde_json::Value) -> Result<Completion, LlmError> {
    let blocks = json["content"]
        .as_array()
        .ok_or_else(|| LlmError::new("No content in Anthropic response".to_string()))?;

    let mut completion = Completion::default();
    for block in blocks.iter().filter(|b| b["type"] == "text") {
        if let Some(text) = block["text"].as_str() {
            completion.text.push_str(text);
        }
        let citations = block["citations"].as_array().into_iter().flatten();
        completion.citations.extend(citations.filter_map(|c| {
            Some(Citation {
                url: c["url"].as_str()?.to_string(),
                title: c["title"].as_str().map(str::to_string),
            })
        }));
    }

    if completion.text.is_empty() {
        return Err(LlmError::new("No text content in Anthropic response".to_string()));
    }
    Ok(completion)
}

/// Extracts text and `url_citation` annotations from an OpenAI chat response.
pub fn parse_openai(json: &serde_json::Value) -> Result<Completion, LlmError> {
    let message = &json["choices"][0]["message"];
    let text = message["content"]
        .as_str()
        .ok_or_else(|| LlmError::new("No content in OpenAI response".to_string()))?
        .to_string();

    let citations = message["annotations"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|a| a["type"] == "url_citation")
        .filter_map(|a| {
            let cite = &a["url_citation"];
            Some(Citation {
                url: cite["url"].as_str()?.to_string(),
                title: cite["title"].as_str().map(str::to_string),
            })
        })
        .collect();

    Ok(Completion { text, citations })
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_anthropic_with_citations() {
        let response = json!({
            "content": [
                { "type": "text", "text": "Take the center. " },
                {
                    "type": "text",
                    "text": "Avoid sending to board 8.",
                    "citations": [
                        {
                            "type": "web_search_result_location",
                            "url": "https://example.com/uttt",
                            "title": "UTTT strategy",
                            "cited_text": "..."
                        }
                    ]
                },
                { "type": "tool_use", "id": "x" }
            ]
        });
        let completion = parse_anthropic(&response).expect("valid response");
        assert_eq!(completion.text, "Take the center. Avoid sending to board 8.");
        assert_eq!(
            completion.citations,
            vec![Citation {
                title: Some("UTTT strategy".to_string()),
                url: "https://example.com/uttt".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_anthropic_without_text_fails() {
        assert!(parse_anthropic(&json!({ "content": [] })).is_err());
        assert!(parse_anthropic(&json!({ "error": "nope" })).is_err());
    }

    #[test]
    fn test_parse_openai_annotations() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Play corners.",
                    "annotations": [
                        {
                            "type": "url_citation",
                            "url_citation": { "url": "https://example.org", "title": null }
                        },
                        { "type": "file_citation", "file_citation": { "file_id": "f" } }
                    ]
                }
            }]
        });
        let completion = parse_openai(&response).expect("valid response");
        assert_eq!(completion.text, "Play corners.");
        assert_eq!(completion.citations.len(), 1);
        assert_eq!(completion.citations[0].title, None);
    }

    #[test]
    fn test_parse_openai_without_annotations() {
        let response = json!({ "choices": [{ "message": { "content": "Hi" } }] });
        let completion = parse_openai(&response).expect("valid response");
        assert!(completion.citations.is_empty());
    }

    #[test]
    fn test_backoff_doubles() {
        let initial = Duration::from_millis(250);
        assert_eq!(backoff_delay(initial, 0), Duration::from_millis(250));
        assert_eq!(backoff_delay(initial, 1), Duration::from_millis(500));
        assert_eq!(backoff_delay(initial, 3), Duration::from_millis(2000));
    }

    fn config(provider: LlmProvider) -> LlmConfig {
        LlmConfig::new(provider, "key".to_string(), "model".to_string(), 100)
    }

    #[test]
    fn test_endpoint_defaults_and_override() {
        assert_eq!(
            config(LlmProvider::Anthropic).endpoint(),
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(
            config(LlmProvider::OpenAI).endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
        let local = config(LlmProvider::OpenAI).with_base_url("http://127.0.0.1:9000/");
        assert_eq!(local.endpoint(), "http://127.0.0.1:9000/v1/chat/completions");
    }

    #[test]
    fn test_web_search_adds_tools() {
        let plain = LlmClient::new(config(LlmProvider::Anthropic));
        assert!(plain.request_body("sys", "msg").get("tools").is_none());

        let anthropic = LlmClient::new(config(LlmProvider::Anthropic).with_web_search(true));
        let body = anthropic.request_body("sys", "msg");
        assert_eq!(body["tools"][0]["type"], "web_search_20250305");
        assert_eq!(body["system"], "sys");

        let openai = LlmClient::new(config(LlmProvider::OpenAI).with_web_search(true));
        let body = openai.request_body("sys", "msg");
        assert!(body["web_search_options"].is_object());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    }
}
