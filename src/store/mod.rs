//! Record store access: the `RecordStore` seam and its Airtable-backed client.

pub mod client;
pub mod formula;

use async_trait::async_trait;

use crate::core::models::{Applicant, FieldMap, Interaction, NewInteraction};
use crate::errors::RushError;

pub use client::AirtableClient;

pub const APPLICANTS_TABLE: &str = "Applicants";
pub const INTERACTIONS_TABLE: &str = "Interactions";

/// Typed view over the applicant and interaction tables.
///
/// Every method is a single network attempt; failures surface as
/// `RushError::StoreUnavailable` (or `ValidationError` for malformed ids).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All applicants, or those matching a store-native filter formula.
    async fn list_applicants(&self, filter: Option<&str>) -> Result<Vec<Applicant>, RushError>;

    /// `Ok(None)` when the store reports the record does not exist.
    async fn get_applicant(&self, id: &str) -> Result<Option<Applicant>, RushError>;

    /// Interactions in store order, optionally restricted to one applicant.
    async fn list_interactions(
        &self,
        applicant_id: Option<&str>,
    ) -> Result<Vec<Interaction>, RushError>;

    /// Partial update; only the supplied fields change.
    async fn update_applicant(&self, id: &str, fields: FieldMap) -> Result<Applicant, RushError>;

    async fn create_interaction(&self, fields: &NewInteraction) -> Result<Interaction, RushError>;
}
