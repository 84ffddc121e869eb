//! All AI/LLM functionality

pub mod client;
pub mod prompt;

use async_trait::async_trait;

// Re-export main types for convenience
pub use client::SummarizerClient;
pub use prompt::NO_NOTES_MESSAGE;

/// Text produced for one applicant.
///
/// `degraded` marks placeholder text that stands in for a failed or
/// unconfigured summarizer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub degraded: bool,
}

impl Summary {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: false,
        }
    }

    pub fn degraded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: true,
        }
    }
}

/// Condenses an applicant's notes. Infallible: failures come back as degraded text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, notes: &[String]) -> Summary;
}
