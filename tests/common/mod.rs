#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rushboard::ai::{Summarizer, Summary};
use rushboard::core::config::AppConfig;
use rushboard::core::models::{Applicant, FieldMap, Interaction, NewInteraction};
use rushboard::errors::RushError;
use rushboard::store::RecordStore;
use serde_json::Value;

/// Record ids shaped like the store's (`rec` + 14 characters).
pub fn rec(n: u32) -> String {
    format!("rec{n:014}")
}

pub fn applicant(id: &str, name: &str) -> Applicant {
    Applicant {
        id: id.to_string(),
        applicant_name: name.to_string(),
        ..Applicant::default()
    }
}

pub fn interaction(id: &str, applicant_id: &str, note: &str) -> Interaction {
    Interaction {
        id: id.to_string(),
        applicant_id: applicant_id.to_string(),
        author_email: "brother@example.com".to_string(),
        note: note.to_string(),
        ..Interaction::default()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::new(
        "airtable-key".to_string(),
        "appTestBase".to_string(),
        "session-secret".to_string(),
        "letmein".to_string(),
    );
    config.summary_delay_ms = 0;
    config
}

/// In-memory store that records every write.
#[derive(Default)]
pub struct FakeStore {
    pub applicants: Vec<Applicant>,
    pub interactions: Vec<Interaction>,
    pub fail_listing: bool,
    pub fail_updates_for: HashSet<String>,
    pub fail_interactions_for: HashSet<String>,
    pub list_calls: AtomicUsize,
    pub updates: Mutex<Vec<(String, FieldMap)>>,
    pub created: Mutex<Vec<NewInteraction>>,
}

impl FakeStore {
    pub fn new(applicants: Vec<Applicant>, interactions: Vec<Interaction>) -> Self {
        Self {
            applicants,
            interactions,
            ..Self::default()
        }
    }

    pub fn updated_ids(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn list_applicants(&self, _filter: Option<&str>) -> Result<Vec<Applicant>, RushError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(RushError::StoreUnavailable("HTTP error! status: 503".to_string()));
        }
        Ok(self.applicants.clone())
    }

    async fn get_applicant(&self, id: &str) -> Result<Option<Applicant>, RushError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.applicants.iter().find(|a| a.id == id).cloned())
    }

    async fn list_interactions(
        &self,
        applicant_id: Option<&str>,
    ) -> Result<Vec<Interaction>, RushError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = applicant_id {
            if self.fail_interactions_for.contains(id) {
                return Err(RushError::StoreUnavailable("HTTP error! status: 500".to_string()));
            }
        }
        Ok(self
            .interactions
            .iter()
            .filter(|i| applicant_id.is_none_or(|id| i.applicant_id == id))
            .cloned()
            .collect())
    }

    async fn update_applicant(&self, id: &str, fields: FieldMap) -> Result<Applicant, RushError> {
        if self.fail_updates_for.contains(id) {
            return Err(RushError::StoreUnavailable("HTTP error! status: 422".to_string()));
        }
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), fields.clone()));

        let mut applicant = self
            .applicants
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| RushError::StoreUnavailable("HTTP error! status: 404".to_string()))?;
        if let Some(Value::String(summary)) = fields.get("notes_summary") {
            applicant.notes_summary = Some(summary.clone());
        }
        Ok(applicant)
    }

    async fn create_interaction(&self, fields: &NewInteraction) -> Result<Interaction, RushError> {
        self.created.lock().unwrap().push(fields.clone());
        Ok(interaction(&rec(999), &fields.applicant_id, &fields.note))
    }
}

/// Summarizer that records the notes it was handed.
#[derive(Default)]
pub struct FakeSummarizer {
    pub degraded: bool,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl FakeSummarizer {
    pub fn degraded() -> Self {
        Self {
            degraded: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, notes: &[String]) -> Summary {
        self.calls.lock().unwrap().push(notes.to_vec());
        if self.degraded {
            Summary::degraded("Error generating AI summary.")
        } else {
            Summary::ok(format!("Summary of {} notes", notes.len()))
        }
    }
}
