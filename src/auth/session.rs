use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::config::AppConfig;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth-token";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    authenticated: bool,
    exp: i64,
}

/// Issues an HS256 JWT valid for `ttl_secs` from now.
#[must_use]
pub fn issue_token(secret: &str, ttl_secs: u64) -> String {
    issue_token_at(secret, ttl_secs, Utc::now().timestamp())
}

#[must_use]
pub fn issue_token_at(secret: &str, ttl_secs: u64, now: i64) -> String {
    let claims = SessionClaims {
        authenticated: true,
        exp: now.saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap_or_else(|e| {
        error!("Failed to sign session token: {}", e);
        String::new()
    })
}

/// True when `token` was signed with `secret` and has not expired.
#[must_use]
pub fn verify_token(secret: &str, token: &str) -> bool {
    verify_token_at(secret, token, Utc::now().timestamp())
}

/// Expiry is checked against `now` with no leeway.
#[must_use]
pub fn verify_token_at(secret: &str, token: &str, now: i64) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let claims = match decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            debug!("Session token rejected: {}", e);
            return false;
        }
    };

    if claims.authenticated && claims.exp > now {
        true
    } else {
        debug!("Session token expired");
        false
    }
}

#[must_use]
pub fn verify_password(config: &AppConfig, candidate: &str) -> bool {
    !config.dashboard_password.is_empty() && candidate == config.dashboard_password
}

/// `Set-Cookie` value that stores a session token.
#[must_use]
pub fn session_cookie(token: &str, ttl_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={ttl_secs}")
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=0")
}
