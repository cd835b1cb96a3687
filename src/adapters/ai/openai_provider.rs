//! OpenAI Provider - Implementation of AIProvider for OpenAI's chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Default model for live counterarguments.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default API root.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini", "gpt-4-turbo").
    pub model: String,
    /// Base URL for the API, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider.
    ///
    /// # Errors
    ///
    /// Returns `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let system = request.system_prompt.iter().map(|prompt| OpenAIMessage {
            role: "system".to_string(),
            content: prompt.clone(),
        });
        let conversation = request.messages.iter().map(|msg| OpenAIMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        });

        OpenAIRequest {
            model: self.config.model.clone(),
            messages: system.chain(conversation).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_openai_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Self::error_for_status(status.as_u16(), &error_body))
    }

    fn error_for_status(status: u16, error_body: &str) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(Self::parse_retry_after(error_body)),
            400 if error_body.contains("content_filter") => {
                AIError::content_filtered(error_body.to_string())
            }
            400 | 404 | 422 => AIError::InvalidRequest(error_body.to_string()),
            500..=599 => {
                AIError::unavailable(format!("Server error {}: {}", status, error_body))
            }
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    /// Extracts "try again in Ns" from an error body, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
            .and_then(|msg| {
                let idx = msg.find("try again in ")?;
                let rest = &msg[idx + "try again in ".len()..];
                let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
                rest[..end].parse::<u32>().ok()
            })
            .unwrap_or(30)
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        self.completion_from(openai_response)
    }

    fn completion_from(&self, openai_response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let usage = openai_response
            .usage
            .map(|u| {
                TokenUsage::new(
                    u.prompt_tokens,
                    u.completion_tokens,
                    self.calculate_cost(u.prompt_tokens, u.completion_tokens),
                )
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            model: openai_response.model,
            finish_reason: FinishReason::from_provider(choice.finish_reason.as_deref()),
        })
    }

    /// Delay before the next attempt, or `None` when the error is final.
    ///
    /// Exponential backoff: 1s, 2s, 4s, ... capped at 32s.
    fn retry_delay(&self, err: &AIError, attempt: u32) -> Option<Duration> {
        if !err.is_retryable() || attempt >= self.config.max_retries {
            return None;
        }
        Some(Duration::from_secs(1 << attempt.min(5)))
    }

    /// Estimated cost in cents based on model and token counts.
    fn calculate_cost(&self, prompt_tokens: u32, completion_tokens: u32) -> u32 {
        // cents per 1M tokens
        let (prompt_price, completion_price) = match self.config.model.as_str() {
            m if m.starts_with("gpt-4o-mini") => (15, 60),
            m if m.starts_with("gpt-4o") => (250, 1000),
            m if m.starts_with("gpt-4-turbo") => (1000, 3000),
            m if m.starts_with("gpt-4") => (3000, 6000),
            m if m.starts_with("gpt-3.5") => (50, 150),
            _ => (250, 1000),
        };

        let prompt_cost = (prompt_tokens as u64 * prompt_price) / 1_000_000;
        let completion_cost = (completion_tokens as u64 * completion_price) / 1_000_000;

        (prompt_cost + completion_cost) as u32
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut attempt = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            let err = match result {
                Ok(completion) => return Ok(completion),
                Err(err) => err,
            };

            let Some(delay) = self.retry_delay(&err, attempt) else {
                return Err(err);
            };
            tracing::warn!(
                trace_id = %request.trace_id,
                attempt = attempt + 1,
                error = %err,
                delay_secs = delay.as_secs(),
                "OpenAI request failed, retrying"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        // ~4 characters per token for GPT models
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gpt-4o") || m.starts_with("gpt-4-turbo") => 128_000,
            m if m.starts_with("gpt-4") => 8192,
            m if m.contains("16k") => 16384,
            m if m.starts_with("gpt-3.5") => 4096,
            _ => 128_000,
        };

        ProviderInfo::new("openai", &self.config.model, max_context)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;

    fn provider(model: &str) -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key").with_model(model)).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com/v1/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = OpenAIConfig::new("sk-very-secret");
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn request_puts_system_prompt_first() {
        let provider = provider("gpt-4o-mini");
        let request = CompletionRequest::new("t")
            .with_system_prompt("be contrary")
            .with_message(MessageRole::User, "We should launch")
            .with_max_tokens(300);

        let body = serde_json::to_value(provider.to_openai_request(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "We should launch");
        assert_eq!(body["max_tokens"], 300);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn completion_is_extracted_from_first_choice() {
        let provider = provider("gpt-4o-mini");
        let raw = r#"{
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{"message": {"role": "assistant", "content": "- one\n- two"}, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 50}
        }"#;
        let parsed: OpenAIResponse = serde_json::from_str(raw).unwrap();

        let completion = provider.completion_from(parsed).unwrap();
        assert_eq!(completion.content, "- one\n- two");
        assert_eq!(completion.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.usage.total_tokens, 150);
    }

    #[test]
    fn empty_choices_is_a_parse_error() {
        let provider = provider("gpt-4o-mini");
        let parsed: OpenAIResponse =
            serde_json::from_str(r#"{"model": "m", "choices": []}"#).unwrap();
        assert!(matches!(provider.completion_from(parsed), Err(AIError::Parse(_))));
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert!(matches!(
            OpenAIProvider::error_for_status(401, ""),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            OpenAIProvider::error_for_status(429, ""),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            OpenAIProvider::error_for_status(400, "bad model"),
            AIError::InvalidRequest(_)
        ));
        assert!(OpenAIProvider::error_for_status(503, "overloaded").is_retryable());
    }

    #[test]
    fn retry_delay_backs_off_exponentially_up_to_max_retries() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_max_retries(3)).unwrap();
        let unavailable = AIError::unavailable("503");

        assert_eq!(provider.retry_delay(&unavailable, 0), Some(Duration::from_secs(1)));
        assert_eq!(provider.retry_delay(&unavailable, 1), Some(Duration::from_secs(2)));
        assert_eq!(provider.retry_delay(&unavailable, 2), Some(Duration::from_secs(4)));
        assert_eq!(provider.retry_delay(&unavailable, 3), None);
    }

    #[test]
    fn retry_delay_is_capped() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_max_retries(10)).unwrap();
        assert_eq!(
            provider.retry_delay(&AIError::network("reset"), 8),
            Some(Duration::from_secs(32))
        );
    }

    #[test]
    fn retry_delay_refuses_final_errors() {
        let provider = provider("gpt-4o-mini");
        assert_eq!(provider.retry_delay(&AIError::AuthenticationFailed, 0), None);
        assert_eq!(provider.retry_delay(&AIError::InvalidRequest("x".into()), 0), None);
        assert_eq!(provider.retry_delay(&AIError::parse("x"), 0), None);
    }

    // Local stub of the chat completions endpoint. Answers with `statuses` in
    // order, then 200.
    mod stub {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        use axum::extract::State;
        use axum::http::StatusCode;
        use axum::routing::post;
        use axum::{Json, Router};
        use serde_json::{json, Value};

        #[derive(Clone)]
        struct StubState {
            hits: Arc<AtomicUsize>,
            statuses: Arc<Vec<u16>>,
        }

        async fn chat_completions(State(state): State<StubState>) -> (StatusCode, Json<Value>) {
            let n = state.hits.fetch_add(1, Ordering::SeqCst);
            match state.statuses.get(n) {
                Some(&code) => (
                    StatusCode::from_u16(code).unwrap(),
                    Json(json!({"error": {"message": "stubbed failure"}})),
                ),
                None => (
                    StatusCode::OK,
                    Json(json!({
                        "model": "gpt-4o-mini",
                        "choices": [{"message": {"content": "- Stub risk"}, "finish_reason": "stop"}],
                        "usage": {"prompt_tokens": 10, "completion_tokens": 5}
                    })),
                ),
            }
        }

        /// Returns the base URL and the hit counter.
        pub async fn serve(statuses: Vec<u16>) -> (String, Arc<AtomicUsize>) {
            let hits = Arc::new(AtomicUsize::new(0));
            let app = Router::new()
                .route("/chat/completions", post(chat_completions))
                .with_state(StubState {
                    hits: hits.clone(),
                    statuses: Arc::new(statuses),
                });

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            (format!("http://{}", addr), hits)
        }
    }

    fn stub_provider(base_url: &str, max_retries: u32) -> OpenAIProvider {
        OpenAIProvider::new(
            OpenAIConfig::new("test-key")
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(5))
                .with_max_retries(max_retries),
        )
        .unwrap()
    }

    fn stub_request() -> CompletionRequest {
        CompletionRequest::new("trace-retry").with_message(MessageRole::User, "Ship it")
    }

    #[tokio::test]
    async fn complete_retries_unavailable_then_succeeds() {
        use std::sync::atomic::Ordering;

        let (base_url, hits) = stub::serve(vec![503]).await;
        let started = std::time::Instant::now();

        let completion = stub_provider(&base_url, 2)
            .complete(stub_request())
            .await
            .unwrap();

        assert_eq!(completion.content, "- Stub risk");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn complete_gives_up_after_max_retries() {
        use std::sync::atomic::Ordering;

        let (base_url, hits) = stub::serve(vec![500, 502]).await;

        let result = stub_provider(&base_url, 1).complete(stub_request()).await;

        assert!(matches!(result, Err(AIError::Unavailable { .. })));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn complete_does_not_retry_authentication_failure() {
        use std::sync::atomic::Ordering;

        let (base_url, hits) = stub::serve(vec![401]).await;

        let result = stub_provider(&base_url, 2).complete(stub_request()).await;

        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cost_calculation_gpt35() {
        // 100k tokens each way: 5 + 15 cents
        assert_eq!(provider("gpt-3.5-turbo").calculate_cost(100_000, 100_000), 20);
    }

    #[test]
    fn cost_calculation_gpt4o_mini() {
        // 1M prompt = 15 cents, 1M completion = 60 cents
        assert_eq!(provider("gpt-4o-mini").calculate_cost(1_000_000, 1_000_000), 75);
    }

    #[test]
    fn provider_info_reports_context_window() {
        let info = provider("gpt-4o-mini").provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o-mini");
        assert_eq!(info.max_context_tokens, 128_000);

        assert_eq!(provider("gpt-3.5-turbo").provider_info().max_context_tokens, 4096);
    }

    #[test]
    fn estimate_tokens_approximates() {
        let provider = provider("gpt-4o-mini");
        assert_eq!(provider.estimate_tokens("Hi"), 1);
        assert_eq!(provider.estimate_tokens("Hello, world!"), 3);
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 12 seconds."}}"#;
        assert_eq!(OpenAIProvider::parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(OpenAIProvider::parse_retry_after("not json"), 30);
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(OpenAIProvider::parse_retry_after(error), 30);
    }
}
