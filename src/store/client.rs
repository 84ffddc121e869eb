//! Airtable REST client
//!
//! Maps the store's `{id, createdTime, fields}` records onto the typed
//! `Applicant` and `Interaction` models. One attempt per call, no caching.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use super::formula::{field_equals, validate_record_id};
use super::{APPLICANTS_TABLE, INTERACTIONS_TABLE, RecordStore};
use crate::core::config::AppConfig;
use crate::core::models::{Applicant, FieldMap, Interaction, NewInteraction};
use crate::errors::RushError;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    #[serde(rename = "createdTime", default)]
    created_time: Option<String>,
    #[serde(default)]
    fields: FieldMap,
}

impl Record {
    fn into_entity<T: DeserializeOwned>(self) -> Result<T, RushError> {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        if let Some(created) = self.created_time {
            fields
                .entry("created_at")
                .or_insert_with(|| Value::String(created));
        }
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| RushError::StoreUnavailable(format!("unexpected record shape: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Record>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordBatch {
    records: Vec<Record>,
}

impl RecordBatch {
    fn into_first<T: DeserializeOwned>(self) -> Result<T, RushError> {
        self.records
            .into_iter()
            .next()
            .ok_or_else(|| RushError::StoreUnavailable("store returned no records".to_string()))?
            .into_entity()
    }
}

/// Record store client for one Airtable base.
pub struct AirtableClient {
    base_url: Url,
    base_id: String,
    api_key: String,
}

impl AirtableClient {
    pub fn new(config: &AppConfig) -> Result<Self, RushError> {
        let base_url = Url::parse(&config.airtable_api_url).map_err(|e| {
            RushError::ConfigError(format!("AIRTABLE_API_URL: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RushError::ConfigError(format!(
                "AIRTABLE_API_URL: {} cannot be a base URL",
                config.airtable_api_url
            )));
        }

        Ok(Self {
            base_url,
            base_id: config.airtable_base_id.clone(),
            api_key: config.airtable_api_key.clone(),
        })
    }

    fn table_url(&self, table: &str, record_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.base_id).push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        HTTP_CLIENT
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
    }

    async fn send(&self, table: &str, builder: RequestBuilder) -> Result<reqwest::Response, RushError> {
        let response = builder.send().await.map_err(|e| {
            error!("Request to {} table failed: {}", table, e);
            RushError::StoreUnavailable(format!("{table} request failed: {e}"))
        })?;
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(table: &str, response: reqwest::Response) -> Result<T, RushError> {
        let status = response.status();
        if !status.is_success() {
            error!("{} table returned HTTP {}", table, status);
            return Err(RushError::StoreUnavailable(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RushError::StoreUnavailable(format!("invalid {table} response: {e}")))
    }

    /// Follows the store's `offset` cursor until every page is read.
    async fn list_records<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: Option<&str>,
    ) -> Result<Vec<T>, RushError> {
        let mut entities = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut url = self.table_url(table, None);
            {
                let mut query = url.query_pairs_mut();
                if let Some(formula) = filter.filter(|f| !f.trim().is_empty()) {
                    query.append_pair("filterByFormula", formula);
                }
                if let Some(cursor) = &offset {
                    query.append_pair("offset", cursor);
                }
            }
            if url.query() == Some("") {
                url.set_query(None);
            }

            let response = self.send(table, self.request(Method::GET, url)).await?;
            let page: RecordPage = Self::decode(table, response).await?;
            debug!("Fetched {} records from {}", page.records.len(), table);

            for record in page.records {
                entities.push(record.into_entity()?);
            }

            match page.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        info!("Fetched {} records from {}", entities.len(), table);
        Ok(entities)
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn list_applicants(&self, filter: Option<&str>) -> Result<Vec<Applicant>, RushError> {
        self.list_records(APPLICANTS_TABLE, filter).await
    }

    async fn get_applicant(&self, id: &str) -> Result<Option<Applicant>, RushError> {
        let id = validate_record_id(id)?;
        let url = self.table_url(APPLICANTS_TABLE, Some(id));
        let response = self
            .send(APPLICANTS_TABLE, self.request(Method::GET, url))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record: Record = Self::decode(APPLICANTS_TABLE, response).await?;
        record.into_entity().map(Some)
    }

    async fn list_interactions(
        &self,
        applicant_id: Option<&str>,
    ) -> Result<Vec<Interaction>, RushError> {
        let filter = match applicant_id {
            Some(id) => Some(field_equals("applicant_id", validate_record_id(id)?)),
            None => None,
        };
        self.list_records(INTERACTIONS_TABLE, filter.as_deref())
            .await
    }

    async fn update_applicant(&self, id: &str, fields: FieldMap) -> Result<Applicant, RushError> {
        let id = validate_record_id(id)?;
        let body = json!({ "records": [{ "id": id, "fields": fields }] });
        let url = self.table_url(APPLICANTS_TABLE, None);
        let response = self
            .send(
                APPLICANTS_TABLE,
                self.request(Method::PATCH, url).json(&body),
            )
            .await?;

        let batch: RecordBatch = Self::decode(APPLICANTS_TABLE, response).await?;
        batch.into_first()
    }

    async fn create_interaction(&self, fields: &NewInteraction) -> Result<Interaction, RushError> {
        validate_record_id(&fields.applicant_id)?;
        let body = json!({ "records": [{ "fields": fields }] });
        let url = self.table_url(INTERACTIONS_TABLE, None);
        let response = self
            .send(
                INTERACTIONS_TABLE,
                self.request(Method::POST, url).json(&body),
            )
            .await?;

        let batch: RecordBatch = Self::decode(INTERACTIONS_TABLE, response).await?;
        batch.into_first()
    }
}
