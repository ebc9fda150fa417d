use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const ROUTE_NOT_FOUND: &str = "Not Found";

/// Errors a handler can return. Internal causes are logged, never sent to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("item not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(Message::new(ITEM_NOT_FOUND))).into_response()
            }
            ApiError::Internal(cause) => {
                error!(error = %cause, "unhandled error while processing request");
                internal_error_response()
            }
        }
    }
}

pub fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(Message::new(INTERNAL_SERVER_ERROR))).into_response()
}

/// `CatchPanicLayer` hook: log the payload, answer with the generic 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail: &str = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&'static str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "request handler panicked");
    internal_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_api_errors() {
        assert!(matches!(ApiError::from(ServiceError::not_found("item")), ApiError::NotFound));
        assert!(matches!(
            ApiError::from(ServiceError::Internal("boom".into())),
            ApiError::Internal(m) if m == "boom"
        ));
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            handle_panic(Box::new("oops")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
