use serde_json::Value;
use tracing::error;

use super::context::AppContext;
use super::{helpers, parsing};
use crate::core::models::NewInteraction;
use crate::errors::RushError;

pub async fn handle_list(ctx: &AppContext, event: &Value) -> Value {
    let applicant_id = parsing::query_param(event, "applicantId").filter(|id| !id.is_empty());
    match ctx.store.list_interactions(applicant_id.as_deref()).await {
        Ok(interactions) => helpers::ok_json(&interactions),
        Err(RushError::ValidationError(msg)) => helpers::err_response(400, &msg),
        Err(e) => {
            error!("Error fetching interactions: {}", e);
            helpers::err_response_with_details(500, "Failed to fetch interactions", &e.to_string())
        }
    }
}

pub async fn handle_create(ctx: &AppContext, event: &Value) -> Value {
    let interaction: NewInteraction = match parsing::json_body(event) {
        Ok(i) => i,
        Err(e) => return helpers::err_response(400, &e.to_string()),
    };
    if interaction.note.trim().is_empty() {
        return helpers::err_response(400, "Note cannot be empty");
    }

    match ctx.store.create_interaction(&interaction).await {
        Ok(created) => helpers::ok_json(&created),
        Err(RushError::ValidationError(msg)) => helpers::err_response(400, &msg),
        Err(e) => {
            error!("Error creating interaction: {}", e);
            helpers::err_response_with_details(500, "Failed to create interaction", &e.to_string())
        }
    }
}
