use serde_json::Value;
use tracing::{info, warn};

use super::SummaryPipeline;
use crate::ai::{NO_NOTES_MESSAGE, Summary};
use crate::core::models::{Applicant, ApplicantSummary, FieldMap};
use crate::errors::RushError;

impl SummaryPipeline {
    /// Non-empty notes for one applicant, in store order.
    pub async fn notes_for(&self, applicant_id: &str) -> Result<Vec<String>, RushError> {
        let interactions = self.store.list_interactions(Some(applicant_id)).await?;
        Ok(interactions
            .into_iter()
            .map(|i| i.note)
            .filter(|note| !note.trim().is_empty())
            .collect())
    }

    /// Summarizes `notes` and writes the text to the applicant's `notes_summary`.
    pub async fn persist_summary(
        &self,
        applicant_id: &str,
        notes: &[String],
    ) -> Result<(Summary, Applicant), RushError> {
        let summary = self.summarizer.summarize(notes).await;
        if summary.degraded {
            warn!(applicant_id, "Summarizer degraded; storing placeholder text");
        }

        let mut fields = FieldMap::new();
        fields.insert(
            "notes_summary".to_string(),
            Value::String(summary.text.clone()),
        );
        let applicant = self.store.update_applicant(applicant_id, fields).await?;
        Ok((summary, applicant))
    }

    /// Regenerates and stores the summary for one applicant.
    ///
    /// Applicants without notes get the placeholder text and are left
    /// untouched in the store.
    ///
    /// # Errors
    ///
    /// `NotFound` when the applicant does not exist; store failures while
    /// reading notes or writing the summary propagate unchanged.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn summarize_applicant(
        &self,
        applicant_id: &str,
    ) -> Result<ApplicantSummary, RushError> {
        let Some(applicant) = self.store.get_applicant(applicant_id).await? else {
            return Err(RushError::NotFound(format!("applicant {applicant_id}")));
        };

        let notes = self.notes_for(applicant_id).await?;
        if notes.is_empty() {
            info!("No notes for applicant; skipping summarizer and store write");
            return Ok(ApplicantSummary {
                summary: NO_NOTES_MESSAGE.to_string(),
                applicant,
                summarizer_degraded: false,
            });
        }

        let (summary, applicant) = self.persist_summary(applicant_id, &notes).await?;
        info!(
            notes = notes.len(),
            degraded = summary.degraded,
            "Stored applicant summary"
        );
        Ok(ApplicantSummary {
            summary: summary.text,
            applicant,
            summarizer_degraded: summary.degraded,
        })
    }
}
