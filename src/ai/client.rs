//! Summarizer (`Perplexity`) API client module
//!
//! Wraps one chat-completions call per applicant. Every failure is folded
//! into a fixed placeholder text so a summary is always produced.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info, warn};

use super::prompt::{NO_NOTES_MESSAGE, build_summary_prompt};
use super::{Summarizer, Summary};
use crate::core::config::AppConfig;
use crate::errors::RushError;

pub const NOT_CONFIGURED_MESSAGE: &str = "Perplexity API key not configured.";
pub const DEGRADED_MESSAGE: &str = "Error generating AI summary.";
pub const EMPTY_COMPLETION_MESSAGE: &str = "Unable to generate summary.";

const MAX_OUTPUT_TOKENS: u32 = 200;
const TEMPERATURE: f64 = 0.3;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Chat-completions client for generating applicant summaries
pub struct SummarizerClient {
    api_key: Option<String>,
    api_url: String,
    model_name: String,
}

impl SummarizerClient {
    #[must_use]
    pub fn new(api_key: Option<String>, api_url: String, model_name: String) -> Self {
        Self {
            api_key,
            api_url,
            model_name,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.perplexity_api_key.clone(),
            config.perplexity_api_url.clone(),
            config.perplexity_model.clone(),
        )
    }

    pub fn build_prompt(&self, notes: &[String]) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(build_summary_prompt(notes)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }]
    }

    /// Sends the prompt and returns the first choice's trimmed text.
    pub async fn generate_summary(
        &self,
        api_key: &str,
        prompt: Vec<ChatCompletionMessage>,
    ) -> Result<Option<String>, RushError> {
        #[cfg(feature = "debug-logs")]
        info!("Using summarizer prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting summary from {} with {} messages in prompt",
            self.model_name,
            prompt.len()
        );

        let messages: Vec<Value> = prompt
            .iter()
            .map(|msg| {
                let role_str = match msg.role {
                    MessageRole::system => "system",
                    MessageRole::user => "user",
                    MessageRole::assistant => "assistant",
                    MessageRole::function => "function",
                    MessageRole::tool => "tool",
                };

                let content_val = match &msg.content {
                    Content::Text(text) => json!(text),
                    Content::ImageUrl(_) => json!(""),
                };

                json!({
                    "role": role_str,
                    "content": content_val
                })
            })
            .collect();

        let request_body = json!({
            "model": self.model_name,
            "messages": messages,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE
        });

        let response = HTTP_CLIENT
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RushError::HttpError(format!("Summarizer request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RushError::SummarizerError(format!(
                "Perplexity API error: {}",
                response.status().as_u16()
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            RushError::SummarizerError(format!("Failed to parse summarizer response: {e}"))
        })?;

        Ok(response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string))
    }
}

#[async_trait]
impl Summarizer for SummarizerClient {
    async fn summarize(&self, notes: &[String]) -> Summary {
        if notes.is_empty() {
            return Summary::ok(NO_NOTES_MESSAGE);
        }

        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Summarizer API key not configured; returning placeholder");
            return Summary::degraded(NOT_CONFIGURED_MESSAGE);
        };

        match self.generate_summary(api_key, self.build_prompt(notes)).await {
            Ok(Some(text)) => Summary::ok(text),
            Ok(None) => {
                warn!("Summarizer returned no completion text");
                Summary::degraded(EMPTY_COMPLETION_MESSAGE)
            }
            Err(e) => {
                error!("Error generating summary: {}", e);
                Summary::degraded(DEGRADED_MESSAGE)
            }
        }
    }
}
