//! HTTP client for the OpenRouter chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use seodraft_core::analysis::{parse_analysis_reply, Analysis, AnalysisError, AnalysisGateway};

use crate::prompt;
use crate::types::{ChatRequest, ChatResponse};

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Settings for [`OpenRouterGateway`].
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Bearer token for OpenRouter.
    pub api_key: String,
    pub model: String,
    /// API base, without the `/chat/completions` suffix.
    pub base_url: String,
    pub temperature: f32,
    /// Whole-request timeout.
    pub timeout_secs: u64,
    /// Sent as `HTTP-Referer` (OpenRouter app attribution).
    pub referer: String,
    /// Sent as `X-Title` (OpenRouter app attribution).
    pub app_title: String,
}

impl AnalysisSettings {
    /// Load analysis settings from environment variables.
    ///
    /// | Env Var                 | Required | Default                        |
    /// |-------------------------|----------|--------------------------------|
    /// | `OPENROUTER_API_KEY`    | **yes**  | --                             |
    /// | `OPENROUTER_MODEL`      | no       | `openai/gpt-3.5-turbo`         |
    /// | `OPENROUTER_BASE_URL`   | no       | `https://openrouter.ai/api/v1` |
    /// | `ANALYSIS_TEMPERATURE`  | no       | `0.7`                          |
    /// | `ANALYSIS_TIMEOUT_SECS` | no       | `60`                           |
    /// | `ANALYSIS_REFERER`      | no       | `http://localhost:3000`        |
    /// | `ANALYSIS_APP_TITLE`    | no       | `SEO Content Tool`             |
    ///
    /// # Panics
    ///
    /// Panics if `OPENROUTER_API_KEY` is missing or empty, or a numeric
    /// variable does not parse.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .expect("OPENROUTER_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "OPENROUTER_API_KEY must not be empty");

        let temperature: f32 = std::env::var("ANALYSIS_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".into())
            .parse()
            .expect("ANALYSIS_TEMPERATURE must be a valid f32");

        let timeout_secs: u64 = std::env::var("ANALYSIS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("ANALYSIS_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model: std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            temperature,
            timeout_secs,
            referer: std::env::var("ANALYSIS_REFERER")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            app_title: std::env::var("ANALYSIS_APP_TITLE")
                .unwrap_or_else(|_| "SEO Content Tool".into()),
        }
    }
}

/// [`AnalysisGateway`] that asks an OpenRouter-hosted model to score content.
#[derive(Debug, Clone)]
pub struct OpenRouterGateway {
    client: reqwest::Client,
    settings: AnalysisSettings,
}

impl OpenRouterGateway {
    /// Build the gateway with a client honouring `settings.timeout_secs`.
    pub fn new(settings: AnalysisSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    /// Send one chat completion and return the first choice's text.
    async fn complete(&self, title: &str, content: &str) -> Result<String, AnalysisError> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: prompt::messages(title, content),
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.settings.api_key)
            .header("HTTP-Referer", &self.settings.referer)
            .header("X-Title", &self.settings.app_title)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or(AnalysisError::EmptyReply)
    }
}

#[async_trait]
impl AnalysisGateway for OpenRouterGateway {
    async fn analyze(&self, title: &str, content: &str) -> Result<Analysis, AnalysisError> {
        tracing::debug!(
            model = %self.settings.model,
            content_chars = content.chars().count(),
            "Requesting SEO analysis"
        );

        let reply = self.complete(title, content).await?;
        let analysis = parse_analysis_reply(&reply)?;

        tracing::debug!(
            score = analysis.score,
            keywords = analysis.keywords.len(),
            suggestions = analysis.suggestions.len(),
            "SEO analysis received"
        );
        Ok(analysis)
    }
}
