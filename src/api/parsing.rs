//! Accessors over the API Gateway HTTP event payload.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::RushError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// HTTP method for both payload versions (v2 `requestContext.http.method`, v1 `httpMethod`).
#[must_use]
pub fn request_method(event: &Value) -> String {
    v_str(event, &["requestContext", "http", "method"])
        .or_else(|| v_str(event, &["httpMethod"]))
        .unwrap_or("GET")
        .to_ascii_uppercase()
}

/// Request path without a trailing slash.
#[must_use]
pub fn request_path(event: &Value) -> &str {
    let path = v_str(event, &["rawPath"])
        .or_else(|| v_str(event, &["path"]))
        .unwrap_or("/");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Looks a cookie up in the v2 `cookies` array, then in the `Cookie` header.
#[must_use]
pub fn cookie_value(event: &Value, name: &str) -> Option<String> {
    let from_array = event
        .get("cookies")
        .and_then(|c| c.as_array())
        .into_iter()
        .flatten()
        .filter_map(|c| c.as_str());

    let from_header = event
        .get("headers")
        .and_then(|h| get_header_value(h, "cookie"))
        .into_iter()
        .flat_map(|h| h.split(';'));

    from_array.chain(from_header).find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

/// Decoded query parameter from `queryStringParameters` or `rawQueryString`.
#[must_use]
pub fn query_param(event: &Value, name: &str) -> Option<String> {
    if let Some(v) = v_str(event, &["queryStringParameters", name]) {
        return Some(v.to_string());
    }

    v_str(event, &["rawQueryString"]).and_then(|q| {
        q.split('&').find_map(|kv| {
            let (key, value) = kv.split_once('=').unwrap_or((kv, ""));
            if key == name {
                let spaced = value.replace('+', " ");
                urlencoding::decode(&spaced).ok().map(|v| v.into_owned())
            } else {
                None
            }
        })
    })
}

/// Raw request body, base64-decoded when the gateway flagged it.
pub fn body_text(event: &Value) -> Result<String, RushError> {
    let Some(body) = event.get("body").and_then(|b| b.as_str()) else {
        return Ok(String::new());
    };

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| RushError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| RushError::ParseError(format!("Body is not UTF-8: {e}")))
}

pub fn json_body<T: DeserializeOwned>(event: &Value) -> Result<T, RushError> {
    let body = body_text(event)?;
    if body.trim().is_empty() {
        return Err(RushError::ParseError("Missing body".to_string()));
    }
    serde_json::from_str(&body).map_err(|e| RushError::ParseError(format!("Invalid JSON body: {e}")))
}
