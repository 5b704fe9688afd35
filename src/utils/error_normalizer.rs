// veche-client/src/utils/error_normalizer.rs
//! Turns failed responses and errors into one display string.
//!
//! This is the only place that looks at error bodies. Everything downstream
//! switches on the [`ErrorKind`] carried by the resulting [`ApiError`].
use crate::client::ApiResponse;
use crate::models::{ApiError, ErrorKind};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

fn synthetic(status: u16) -> String {
    format!("Request failed with {}", status)
}

// First entry of a non-empty `errors` object
fn first_field_error(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_object()?;
    let (_, first) = errors.iter().next()?;
    Some(match first {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn has_field_errors(body: &Value) -> bool {
    let non_empty = |key: &str| {
        body.get(key)
            .and_then(Value::as_object)
            .map_or(false, |map| !map.is_empty())
    };
    non_empty("errors") || non_empty("fields")
}

fn message_from_json(status: u16, body: &Value) -> String {
    if let Some(message) = first_field_error(body) {
        return message;
    }

    match body {
        Value::Null => synthetic(status),
        Value::String(s) if s.is_empty() => synthetic(status),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Message for a failed response.
///
/// JSON bodies yield the first `errors` entry, or the whole body stringified.
/// Other bodies yield their text, or `Request failed with <status>` when empty.
pub fn message_from_response(response: &ApiResponse) -> String {
    if response.is_json() {
        match serde_json::from_str::<Value>(&response.body) {
            Ok(body) => return message_from_json(response.status, &body),
            Err(e) => debug!("🧾 Error body claimed JSON but did not parse: {}", e),
        }
    }

    if response.body.is_empty() {
        synthetic(response.status)
    } else {
        response.body.clone()
    }
}

pub fn api_error_from_response(response: &ApiResponse) -> ApiError {
    let field_errors = response.is_json()
        && serde_json::from_str::<Value>(&response.body)
            .map(|body| has_field_errors(&body))
            .unwrap_or(false);

    ApiError::new(
        ErrorKind::from_status(response.status, field_errors),
        Some(response.status),
        message_from_response(response),
    )
}

pub fn message_from_error(err: &dyn std::error::Error) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}

// Anything else that surfaced as a failure
pub fn message_from_value<T: Serialize + Debug + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}
