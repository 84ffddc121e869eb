//! Applicant routes, including the summary endpoints.

use serde_json::{Value, json};
use tracing::{error, info};

use super::context::AppContext;
use super::{helpers, parsing};
use crate::core::models::FieldMap;
use crate::errors::RushError;

fn store_error(e: &RushError, message: &str) -> Value {
    match e {
        RushError::ValidationError(_) | RushError::ParseError(_) => {
            helpers::err_response(400, &e.to_string())
        }
        RushError::NotFound(_) => helpers::err_response(404, "Applicant not found"),
        _ => helpers::err_response_with_details(e.status_code(), message, &e.to_string()),
    }
}

pub async fn handle_list(ctx: &AppContext, event: &Value) -> Value {
    let filter = parsing::query_param(event, "filterByFormula");
    match ctx.store.list_applicants(filter.as_deref()).await {
        Ok(applicants) => {
            info!("Returning {} applicants", applicants.len());
            helpers::no_cache(helpers::ok_json(&applicants))
        }
        Err(e) => {
            error!("Error fetching applicants: {}", e);
            store_error(&e, "Failed to fetch applicants")
        }
    }
}

pub async fn handle_get(ctx: &AppContext, id: &str) -> Value {
    match ctx.store.get_applicant(id).await {
        Ok(Some(applicant)) => helpers::ok_json(&applicant),
        Ok(None) => helpers::err_response(404, "Applicant not found"),
        Err(e) => {
            error!("Error fetching applicant {}: {}", id, e);
            store_error(&e, "Failed to fetch applicant")
        }
    }
}

pub async fn handle_update(ctx: &AppContext, id: &str, event: &Value) -> Value {
    let fields: FieldMap = match parsing::json_body(event) {
        Ok(f) => f,
        Err(e) => return helpers::err_response(400, &e.to_string()),
    };
    if fields.contains_key("id") {
        return helpers::err_response(400, "Record id cannot be updated");
    }

    match ctx.store.update_applicant(id, fields).await {
        Ok(applicant) => helpers::ok_json(&applicant),
        Err(e) => {
            error!("Error updating applicant {}: {}", id, e);
            store_error(&e, "Failed to update applicant")
        }
    }
}

pub async fn handle_summary(ctx: &AppContext, id: &str) -> Value {
    match ctx.pipeline.summarize_applicant(id).await {
        Ok(result) => helpers::ok_json(&json!({
            "success": true,
            "summary": result.summary,
            "applicant": result.applicant
        })),
        Err(e) => {
            error!("Error generating summary for {}: {}", id, e);
            store_error(&e, "Failed to generate summary")
        }
    }
}

pub async fn handle_generate_summaries(ctx: &AppContext) -> Value {
    match ctx.pipeline.run_batch().await {
        Ok(report) => helpers::ok_json(&json!({
            "success": true,
            "results": report.results,
            "total": report.total,
            "successful": report.successful
        })),
        Err(e) => {
            error!("Error generating summaries: {}", e);
            helpers::err_response_with_details(500, "Failed to generate summaries", &e.to_string())
        }
    }
}
