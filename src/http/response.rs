//! Default responses and the handler fault type.
//!
//! # Design Decisions
//! - A panicking handler is turned into a typed `HandlerPanic` at the single
//!   point where the mux invokes handlers; the trie never sees it
//! - Default bodies are plain text

use std::any::Any;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A handler panicked while serving a request.
#[derive(Debug, Clone, Error)]
#[error("handler for {method} {path} panicked: {message}")]
pub struct HandlerPanic {
    pub method: Method,
    pub path: String,
    pub message: String,
}

impl HandlerPanic {
    pub(crate) fn from_payload(method: Method, path: String, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self {
            method,
            path,
            message,
        }
    }
}

/// `404 Not Found`.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// `500 Internal Server Error`.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_extraction() {
        let from_str = HandlerPanic::from_payload(Method::GET, "/a".into(), Box::new("boom"));
        assert_eq!(from_str.message, "boom");

        let from_string =
            HandlerPanic::from_payload(Method::GET, "/a".into(), Box::new(String::from("bang")));
        assert_eq!(from_string.message, "bang");

        let other = HandlerPanic::from_payload(Method::GET, "/a".into(), Box::new(42_u8));
        assert_eq!(other.message, "unknown panic payload");
        assert_eq!(other.to_string(), "handler for GET /a panicked: unknown panic payload");
    }

    #[test]
    fn test_default_statuses() {
        assert_eq!(not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(internal_error().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
