//! OpenAI chat-completions provider for the meal planner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::ports::{AiError, MealPlanAi};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI-backed completion provider.
///
/// After a 401 the provider latches itself off for the rest of the
/// process: a bad key will not become valid by retrying, and every
/// failed call costs the member a 12-second wait before the fallback
/// plan kicks in.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<Secret<String>>,
    model: String,
    max_tokens: u32,
    unauthorized: AtomicBool,
}

impl OpenAiProvider {
    pub fn new(config: &AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: config
                .openai_api_key
                .as_ref()
                .filter(|k| !k.is_empty())
                .map(|k| Secret::new(k.clone())),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            unauthorized: AtomicBool::new(false),
        }
    }

    /// Override the request timeout (mainly for tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        self
    }

    fn map_status(&self, status: StatusCode, body: String) -> AiError {
        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::error!("OpenAI rejected the API key; disabling AI meal plans");
                self.unauthorized.store(true, Ordering::Relaxed);
                AiError::AuthenticationFailed
            }
            StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited,
            status => AiError::RequestFailed(format!("HTTP {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl MealPlanAi for OpenAiProvider {
    fn is_available(&self) -> bool {
        self.api_key.is_some() && !self.unauthorized.load(Ordering::Relaxed)
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_ref().ok_or(AiError::Disabled)?;
        if self.unauthorized.load(Ordering::Relaxed) {
            return Err(AiError::Disabled);
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: 0.7,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.map_status(status, body));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AiError::InvalidResponse("Empty completion".to_string()))
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}
