//! Request body extraction for item payloads.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde_json::Value;
use service::item::Fields;

use crate::errors::ApiError;

/// A JSON object body.
///
/// Only `application/json` bodies are parsed; any other or missing
/// `Content-Type`, and an empty body, read as `{}`. A JSON array becomes an
/// object keyed by index. Unreadable bodies, malformed JSON and JSON scalars
/// are internal errors.
#[derive(Debug)]
pub struct JsonObject(pub Fields);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(JsonObject(Fields::new()));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read request body: {e}")))?;
        parse_object(&bytes).map(JsonObject)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

fn parse_object(bytes: &[u8]) -> Result<Fields, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Array(values)) => Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect()),
        Ok(other) => Err(ApiError::Internal(format!(
            "request body must be a JSON object or array, got {}",
            kind(&other)
        ))),
        Err(e) => Err(ApiError::Internal(format!("malformed JSON body: {e}"))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
