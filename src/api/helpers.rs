//! Common helper functions for API handlers.
//!
//! Response builders for API Gateway proxy responses.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

/// Returns a JSON response with the given status code.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|e| {
        error!("Failed to serialize response body: {}", e);
        "{}".to_string()
    });
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body
    })
}

/// Returns a 200 OK response with a JSON body.
#[must_use]
pub fn ok_json<T: Serialize>(body: &T) -> Value {
    json_response(200, body)
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Like `err_response`, with the underlying cause attached.
#[must_use]
pub fn err_response_with_details(status_code: u16, message: &str, details: &str) -> Value {
    json_response(status_code, &json!({ "error": message, "details": details }))
}

#[must_use]
pub fn unauthorized() -> Value {
    err_response(401, "Unauthorized")
}

/// Adds a `Set-Cookie` entry using the v2 `cookies` response array.
#[must_use]
pub fn with_cookie(mut response: Value, cookie: String) -> Value {
    if let Some(obj) = response.as_object_mut() {
        let cookies = obj.entry("cookies").or_insert_with(|| json!([]));
        if let Some(list) = cookies.as_array_mut() {
            list.push(Value::String(cookie));
        }
    }
    response
}

/// Marks a response as never cacheable.
#[must_use]
pub fn no_cache(mut response: Value) -> Value {
    if let Some(headers) = response.get_mut("headers").and_then(Value::as_object_mut) {
        headers.insert(
            "Cache-Control".to_string(),
            json!("no-cache, no-store, must-revalidate, private"),
        );
        headers.insert("Pragma".to_string(), json!("no-cache"));
        headers.insert("Expires".to_string(), json!("0"));
    }
    response
}
