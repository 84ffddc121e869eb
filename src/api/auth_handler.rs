//! Login, logout and session verification.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::context::AppContext;
use super::{helpers, parsing};
use crate::auth::{
    SESSION_COOKIE, cleared_cookie, issue_token, session_cookie, verify_password, verify_token,
};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    password: String,
}

/// True when the request carries a valid session cookie.
#[must_use]
pub fn is_authenticated(ctx: &AppContext, event: &Value) -> bool {
    parsing::cookie_value(event, SESSION_COOKIE)
        .is_some_and(|token| verify_token(&ctx.config.jwt_secret, &token))
}

pub fn handle_login(ctx: &AppContext, event: &Value) -> Value {
    let request: LoginRequest = match parsing::json_body(event) {
        Ok(r) => r,
        Err(e) => {
            warn!("Login request rejected: {}", e);
            return helpers::err_response(400, "Password is required");
        }
    };

    if request.password.is_empty() {
        return helpers::err_response(400, "Password is required");
    }

    if !verify_password(&ctx.config, &request.password) {
        warn!("Login attempt with invalid password");
        return helpers::err_response(401, "Invalid password");
    }

    let ttl = ctx.config.session_ttl_secs;
    let token = issue_token(&ctx.config.jwt_secret, ttl);
    info!("Issued dashboard session");
    helpers::with_cookie(
        helpers::ok_json(&json!({ "success": true })),
        session_cookie(&token, ttl),
    )
}

#[must_use]
pub fn handle_logout() -> Value {
    helpers::with_cookie(
        helpers::ok_json(&json!({ "success": true })),
        cleared_cookie(),
    )
}

pub fn handle_verify(ctx: &AppContext, event: &Value) -> Value {
    if is_authenticated(ctx, event) {
        helpers::ok_json(&json!({ "authenticated": true }))
    } else {
        helpers::json_response(401, &json!({ "authenticated": false }))
    }
}
