//! API Lambda handler - thin router that delegates to specialized handlers.
//!
//! This module handles:
//! - Resolving configuration and wiring the store/summarizer clients
//! - Session routes (delegated to `auth_handler`)
//! - The session gate in front of every data route
//! - Applicant and summary routes (delegated to `applicants_handler`)
//! - Interaction routes (delegated to `interactions_handler`)

use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::context::AppContext;
use super::{applicants_handler, auth_handler, helpers, interactions_handler, parsing};
use crate::core::config::AppConfig;

pub use self::function_handler as handler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Login,
    Logout,
    Verify,
    VersionCheck,
    Applicants,
    GenerateSummaries,
    Applicant(&'a str),
    ApplicantSummary(&'a str),
    Interactions,
    NotFound,
}

impl<'a> Route<'a> {
    #[must_use]
    pub fn resolve(path: &'a str) -> Self {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["api", "auth", "login"] => Route::Login,
            ["api", "auth", "logout"] => Route::Logout,
            ["api", "auth", "verify"] => Route::Verify,
            ["api", "version-check"] => Route::VersionCheck,
            ["api", "applicants"] => Route::Applicants,
            ["api", "applicants", "generate-summaries"] => Route::GenerateSummaries,
            ["api", "applicants", id] if !id.is_empty() => Route::Applicant(*id),
            ["api", "applicants", id, "summary"] if !id.is_empty() => Route::ApplicantSummary(*id),
            ["api", "interactions"] => Route::Interactions,
            _ => Route::NotFound,
        }
    }

    /// Routes reachable without a session.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(
            self,
            Route::Login | Route::Logout | Route::Verify | Route::VersionCheck
        )
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an error only when configuration cannot be loaded; every other
/// failure becomes an HTTP error response.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %Uuid::new_v4()))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e.to_string())
    })?;

    let ctx = match AppContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to initialize clients: {}", e);
            return Ok(helpers::err_response(500, "Server misconfigured"));
        }
    };

    Ok(route(&ctx, &event.payload).await)
}

/// Dispatches one API Gateway event to its handler.
pub async fn route(ctx: &AppContext, event: &Value) -> Value {
    let method = parsing::request_method(event);
    let path = parsing::request_path(event);
    let route = Route::resolve(path);
    info!(method = %method, path = %path, "API request");

    // ========================================================================
    // Session gate
    // ========================================================================

    if !route.is_public() && route != Route::NotFound && !auth_handler::is_authenticated(ctx, event)
    {
        warn!(path = %path, "Rejected request without a valid session");
        return helpers::unauthorized();
    }

    // ========================================================================
    // Route to specialized handlers
    // ========================================================================

    match (route, method.as_str()) {
        (Route::Login, "POST") => auth_handler::handle_login(ctx, event),
        (Route::Logout, "POST") => auth_handler::handle_logout(),
        (Route::Verify, "GET") => auth_handler::handle_verify(ctx, event),
        (Route::VersionCheck, "GET") => version_check(ctx),
        (Route::Applicants, "GET") => applicants_handler::handle_list(ctx, event).await,
        (Route::GenerateSummaries, "POST") => {
            applicants_handler::handle_generate_summaries(ctx).await
        }
        (Route::Applicant(id), "GET") => applicants_handler::handle_get(ctx, id).await,
        (Route::Applicant(id), "PATCH") => {
            applicants_handler::handle_update(ctx, id, event).await
        }
        (Route::ApplicantSummary(id), "POST") => applicants_handler::handle_summary(ctx, id).await,
        (Route::Interactions, "GET") => interactions_handler::handle_list(ctx, event).await,
        (Route::Interactions, "POST") => interactions_handler::handle_create(ctx, event).await,
        (Route::NotFound, _) => helpers::err_response(404, "Not found"),
        _ => helpers::err_response(405, "Method not allowed"),
    }
}

fn version_check(ctx: &AppContext) -> Value {
    helpers::ok_json(&json!({
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "hasAirtableApiKey": !ctx.config.airtable_api_key.is_empty(),
        "hasAirtableBaseId": !ctx.config.airtable_base_id.is_empty(),
        "hasPerplexityApiKey": ctx.config.perplexity_api_key.is_some()
    }))
}
