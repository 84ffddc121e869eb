//! Summary pipeline: the single-applicant unit of work and the batch run over it.

pub mod batch;
pub mod single;

use std::sync::Arc;
use std::time::Duration;

use crate::ai::Summarizer;
use crate::core::config::AppConfig;
use crate::store::RecordStore;

/// Summary shown for an applicant whose item failed inside a batch run.
pub const ITEM_FAILURE_MESSAGE: &str = "Error generating summary.";

/// Composes the record store and the summarizer.
pub struct SummaryPipeline {
    store: Arc<dyn RecordStore>,
    summarizer: Arc<dyn Summarizer>,
    item_delay: Duration,
}

impl SummaryPipeline {
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        summarizer: Arc<dyn Summarizer>,
        item_delay: Duration,
    ) -> Self {
        Self {
            store,
            summarizer,
            item_delay,
        }
    }

    #[must_use]
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn RecordStore>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self::new(store, summarizer, config.summary_delay())
    }

    #[must_use]
    pub fn item_delay(&self) -> Duration {
        self.item_delay
    }
}
