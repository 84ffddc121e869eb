use std::env;
use std::time::Duration;

use crate::errors::RushError;

pub const DEFAULT_STORE_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_SUMMARIZER_API_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "llama-3.1-sonar-small-128k-online";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 3600;
pub const DEFAULT_SUMMARY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_api_url: String,
    pub perplexity_api_key: Option<String>,
    pub perplexity_api_url: String,
    pub perplexity_model: String,
    pub jwt_secret: String,
    pub dashboard_password: String,
    pub session_ttl_secs: u64,
    pub summary_delay_ms: u64,
}

impl AppConfig {
    /// Builds a config with defaults for everything but the credentials.
    #[must_use]
    pub fn new(
        airtable_api_key: String,
        airtable_base_id: String,
        jwt_secret: String,
        dashboard_password: String,
    ) -> Self {
        Self {
            airtable_api_key,
            airtable_base_id,
            airtable_api_url: DEFAULT_STORE_API_URL.to_string(),
            perplexity_api_key: None,
            perplexity_api_url: DEFAULT_SUMMARIZER_API_URL.to_string(),
            perplexity_model: DEFAULT_SUMMARIZER_MODEL.to_string(),
            jwt_secret,
            dashboard_password,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            summary_delay_ms: DEFAULT_SUMMARY_DELAY_MS,
        }
    }

    pub fn from_env() -> Result<Self, RushError> {
        Ok(Self {
            airtable_api_key: required("AIRTABLE_API_KEY")?,
            airtable_base_id: required("AIRTABLE_BASE_ID")?,
            airtable_api_url: env::var("AIRTABLE_API_URL")
                .unwrap_or_else(|_| DEFAULT_STORE_API_URL.to_string()),
            perplexity_api_key: env::var("PERPLEXITY_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            perplexity_api_url: env::var("PERPLEXITY_API_URL")
                .unwrap_or_else(|_| DEFAULT_SUMMARIZER_API_URL.to_string()),
            perplexity_model: env::var("PERPLEXITY_MODEL")
                .unwrap_or_else(|_| DEFAULT_SUMMARIZER_MODEL.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            dashboard_password: required("DASHBOARD_PASSWORD")?,
            session_ttl_secs: numeric("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            summary_delay_ms: numeric("SUMMARY_DELAY_MS", DEFAULT_SUMMARY_DELAY_MS)?,
        })
    }

    #[must_use]
    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }
}

fn required(name: &str) -> Result<String, RushError> {
    env::var(name)
        .map_err(|e| RushError::ConfigError(format!("{name}: {e}")))
        .and_then(|v| {
            if v.trim().is_empty() {
                Err(RushError::ConfigError(format!("{name}: empty value")))
            } else {
                Ok(v)
            }
        })
}

fn numeric(name: &str, default: u64) -> Result<u64, RushError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| RushError::ConfigError(format!("{name}: {e}"))),
        Err(_) => Ok(default),
    }
}
