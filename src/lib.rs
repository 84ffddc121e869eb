/// Rushboard - backend for a rush-applicant tracking dashboard.
///
/// This crate implements an API Lambda that sits in front of an Airtable base
/// (applicants and their interaction notes) and a Perplexity chat-completions
/// endpoint that condenses each applicant's notes into a short summary.
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda (HTTP API payloads) for serverless execution
/// - reqwest for the record store and summarizer HTTP calls
/// - openai-api-rs chat types for the summarizer prompt
/// - an HMAC-signed cookie for dashboard sessions
/// - Tokio for async runtime
///
/// The summary pipeline processes applicants one at a time, pausing between
/// them to stay under the summarizer's rate limit, and reports per-applicant
/// success or failure instead of aborting.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use rushboard::ai::SummarizerClient;
/// use rushboard::core::config::AppConfig;
/// use rushboard::pipeline::SummaryPipeline;
/// use rushboard::store::AirtableClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     rushboard::setup_logging();
///
///     let config = AppConfig::new(
///         "dummy_airtable_key".to_string(),
///         "appDummyBase".to_string(),
///         "dummy_session_secret".to_string(),
///         "dummy_password".to_string(),
///     );
///
///     let pipeline = SummaryPipeline::from_config(
///         &config,
///         Arc::new(AirtableClient::new(&config)?),
///         Arc::new(SummarizerClient::from_config(&config)),
///     );
///
///     let report = pipeline.run_batch().await?;
///     println!("{}/{} summaries generated", report.successful, report.total);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod auth;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod store;

pub use errors::RushError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Installs a tracing-subscriber JSON formatter suitable for `CloudWatch`
/// Logs, filtered by `RUST_LOG` (default `info`). Calling it more than once
/// is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// rushboard::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
