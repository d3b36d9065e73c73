//! The gateway client.
//!
//! Talks to an `OpenAI`-compatible chat completions endpoint at
//! `{api_url}/chat/completions` with bearer auth. Songs go to the text
//! model; drawings and video frames go to the image model with image output
//! enabled. There is no retry; each call is bounded by the configured
//! timeout.

use std::time::Duration;

use tracing::{error, info};

use crate::error::StudioError;
use crate::prompt::{PromptEngine, RenderedPrompt};
use crate::request::{ContentKind, GeneratedContent, GenerationRequest, extract_image_url, extract_text};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL, without the `/chat/completions` suffix.
    pub api_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model for songs.
    pub text_model: String,
    /// Model for drawings and video frames.
    pub image_model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration with the given endpoint, key, and models.
    pub fn new(api_url: &str, api_key: &str, text_model: &str, image_model: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            text_model: text_model.to_owned(),
            image_model: image_model.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the generative content gateway.
pub struct GatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
    prompts: PromptEngine,
}

impl GatewayClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NotConfigured`] when the key is empty,
    /// [`StudioError::Request`] if the HTTP client cannot be built, or
    /// [`StudioError::Template`] if a prompt template fails to compile.
    pub fn new(config: GatewayConfig) -> Result<Self, StudioError> {
        if config.api_key.is_empty() {
            return Err(StudioError::NotConfigured);
        }
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            prompts: PromptEngine::new()?,
        })
    }

    /// Generate a song, drawing, or video frame.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::EmptyDescription`] before any network call
    /// when the description is blank, and the other [`StudioError`]
    /// variants when the gateway call fails.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, StudioError> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(StudioError::EmptyDescription);
        }

        let prompt = self.prompts.render(request.kind, description)?;
        info!(kind = ?request.kind, "Generating content");
        let json = self.complete(request.kind, &prompt).await?;

        let content = if request.kind.is_image() {
            GeneratedContent::Image {
                image_url: extract_image_url(&json).map_err(StudioError::MissingContent)?,
            }
        } else {
            GeneratedContent::Text {
                text: extract_text(&json).map_err(StudioError::MissingContent)?,
            }
        };
        info!(kind = ?request.kind, "Content generated");
        Ok(content)
    }

    async fn complete(&self, kind: ContentKind, prompt: &RenderedPrompt) -> Result<serde_json::Value, StudioError> {
        let url = format!("{}/chat/completions", self.config.api_url);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(serde_json::json!({"role": "system", "content": system}));
        }
        messages.push(serde_json::json!({"role": "user", "content": prompt.user}));

        let body = if kind.is_image() {
            serde_json::json!({
                "model": self.config.image_model,
                "messages": messages,
                "modalities": ["image", "text"],
            })
        } else {
            serde_json::json!({
                "model": self.config.text_model,
                "messages": messages,
            })
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            error!(status = status.as_u16(), kind = ?kind, "Gateway error");
            return Err(StudioError::Gateway {
                status: status.as_u16(),
                body: error_body,
            });
        }

        Ok(response.json().await?)
    }
}
