use std::sync::Arc;

use crate::ai::{Summarizer, SummarizerClient};
use crate::core::config::AppConfig;
use crate::errors::RushError;
use crate::pipeline::SummaryPipeline;
use crate::store::{AirtableClient, RecordStore};

/// Everything a request handler needs, built once per invocation.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn RecordStore>,
    pub pipeline: SummaryPipeline,
}

impl AppContext {
    #[must_use]
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let pipeline = SummaryPipeline::from_config(&config, Arc::clone(&store), summarizer);
        Self {
            config,
            store,
            pipeline,
        }
    }

    /// Wires the Airtable and Perplexity clients from `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, RushError> {
        let store: Arc<dyn RecordStore> = Arc::new(AirtableClient::new(&config)?);
        let summarizer: Arc<dyn Summarizer> = Arc::new(SummarizerClient::from_config(&config));
        Ok(Self::new(config, store, summarizer))
    }
}
