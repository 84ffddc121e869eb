use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Flat field map as accepted and returned by the record store.
pub type FieldMap = Map<String, Value>;

/// Single-select status column. Values the dashboard has no variant for are
/// kept as `Other` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicantStatus {
    Applied,
    Ongoing,
    Rejected,
    Other(String),
}

impl From<String> for ApplicantStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Applied" => ApplicantStatus::Applied,
            "Ongoing" => ApplicantStatus::Ongoing,
            "Rejected" => ApplicantStatus::Rejected,
            _ => ApplicantStatus::Other(value),
        }
    }
}

impl From<ApplicantStatus> for String {
    fn from(status: ApplicantStatus) -> Self {
        match status {
            ApplicantStatus::Applied => "Applied".to_string(),
            ApplicantStatus::Ongoing => "Ongoing".to_string(),
            ApplicantStatus::Rejected => "Rejected".to_string(),
            ApplicantStatus::Other(value) => value,
        }
    }
}

/// Store cells are user-edited; a value of the wrong type reads as absent
/// instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub applicant_name: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub applicant_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub essay_1: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub essay_2: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub resume: Option<Vec<Attachment>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub notes_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicantStatus>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub day_1: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub day_2: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub day_3: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub day_4: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub day_5: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Store columns this crate does not model (ratings, weights, ...).
    #[serde(flatten)]
    pub extra: FieldMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub applicant_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author_email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: FieldMap,
}

/// Fields accepted when recording a new interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInteraction {
    pub applicant_id: String,
    pub author_email: String,
    pub note: String,
    /// Other columns (e.g. the `Dashboard` link) forwarded to the store as-is.
    #[serde(flatten)]
    pub extra: FieldMap,
}

/// Outcome of summarizing and persisting one applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantSummary {
    pub summary: String,
    pub applicant: Applicant,
    pub summarizer_degraded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub applicant_id: String,
    pub applicant_name: String,
    pub summary: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub summarizer_degraded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub results: Vec<SummaryResult>,
    pub total: usize,
    pub successful: usize,
}

impl BatchReport {
    #[must_use]
    pub fn from_results(results: Vec<SummaryResult>) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            results,
            total,
            successful,
        }
    }
}
