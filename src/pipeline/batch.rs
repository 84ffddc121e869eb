use tracing::{error, info};

use super::{ITEM_FAILURE_MESSAGE, SummaryPipeline};
use crate::ai::NO_NOTES_MESSAGE;
use crate::core::models::{Applicant, BatchReport, SummaryResult};
use crate::errors::RushError;

impl SummaryPipeline {
    /// Regenerates summaries for every applicant, one at a time.
    ///
    /// Items run strictly in list order with `item_delay` between consecutive
    /// items (none after the last). A failure inside one item is recorded in
    /// that item's result and the run moves on.
    ///
    /// # Errors
    ///
    /// Only when the initial applicant listing fails; no partial report is
    /// produced in that case.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn run_batch(&self) -> Result<BatchReport, RushError> {
        let applicants = self.store.list_applicants(None).await.map_err(|e| {
            error!("Failed to list applicants for batch run: {}", e);
            e
        })?;

        let count = applicants.len();
        info!("Starting summary batch for {} applicants", count);

        let mut results = Vec::with_capacity(count);
        for (index, applicant) in applicants.iter().enumerate() {
            results.push(self.process_item(applicant).await);

            if index + 1 < count && !self.item_delay.is_zero() {
                tokio::time::sleep(self.item_delay).await;
            }
        }

        let report = BatchReport::from_results(results);
        info!(
            total = report.total,
            successful = report.successful,
            "Summary batch finished"
        );
        Ok(report)
    }

    async fn process_item(&self, applicant: &Applicant) -> SummaryResult {
        let outcome: Result<Option<(String, bool)>, RushError> = async {
            let notes = self.notes_for(&applicant.id).await?;
            if notes.is_empty() {
                return Ok(None);
            }
            let (summary, _) = self.persist_summary(&applicant.id, &notes).await?;
            Ok(Some((summary.text, summary.degraded)))
        }
        .await;

        match outcome {
            Ok(None) => SummaryResult {
                applicant_id: applicant.id.clone(),
                applicant_name: applicant.applicant_name.clone(),
                summary: NO_NOTES_MESSAGE.to_string(),
                success: true,
                error: None,
                summarizer_degraded: false,
            },
            Ok(Some((summary, degraded))) => SummaryResult {
                applicant_id: applicant.id.clone(),
                applicant_name: applicant.applicant_name.clone(),
                summary,
                success: true,
                error: None,
                summarizer_degraded: degraded,
            },
            Err(e) => {
                error!("Error processing applicant {}: {}", applicant.id, e);
                SummaryResult {
                    applicant_id: applicant.id.clone(),
                    applicant_name: applicant.applicant_name.clone(),
                    summary: ITEM_FAILURE_MESSAGE.to_string(),
                    success: false,
                    error: Some(e.to_string()),
                    summarizer_degraded: false,
                }
            }
        }
    }
}
