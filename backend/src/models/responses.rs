//! # API Response Models
//!
//! Structures for outgoing API responses.
//!
//! Scheme operations answer with the bare entity (or list of entities) as
//! the JSON body. The human-readable confirmation travels separately in the
//! `message` response header.

use actix_web::body::BoxBody;
use actix_web::http::header::HeaderValue;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the response header carrying the confirmation message.
pub const MESSAGE_HEADER: &str = "message";

/// Response envelope for every Scheme operation.
///
/// Built once per request through [`SchemeResponse::created`] or
/// [`SchemeResponse::ok`] and turned into an HTTP response by actix-web:
///
/// ```text
/// HTTP/1.1 201 Created
/// content-type: application/json
/// message: Scheme added successfully.
///
/// {"schemeId":1,"schemeName":"...", ...}
/// ```
#[derive(Debug, Clone)]
pub struct SchemeResponse<T> {
    /// Entity or list of entities serialized as the JSON body.
    pub body: T,

    /// Value of the `message` header.
    pub message: String,

    /// HTTP status code.
    pub status: StatusCode,
}

impl<T> SchemeResponse<T> {
    /// `201 Created` with the given message.
    pub fn created(body: T, message: impl Into<String>) -> Self {
        Self {
            body,
            message: message.into(),
            status: StatusCode::CREATED,
        }
    }

    /// `200 OK` with the given message.
    pub fn ok(body: T, message: impl Into<String>) -> Self {
        Self {
            body,
            message: message.into(),
            status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> Responder for SchemeResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut builder = HttpResponse::build(self.status);
        if let Some(value) = message_header_value(&self.message) {
            builder.insert_header((MESSAGE_HEADER, value));
        }
        builder.json(self.body)
    }
}

/// Encode a message as a header value.
///
/// Path parameters are echoed into messages, so they may carry non-ASCII
/// text (kept as raw UTF-8 bytes) or control characters (dropped).
fn message_header_value(message: &str) -> Option<HeaderValue> {
    HeaderValue::from_bytes(message.as_bytes())
        .or_else(|_| {
            let cleaned: Vec<u8> = message
                .bytes()
                .filter(|b| *b == b'\t' || (*b >= 0x20 && *b != 0x7f))
                .collect();
            HeaderValue::from_bytes(&cleaned)
        })
        .ok()
}

/// Health check response.
///
/// Returned by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status: "healthy" or "unhealthy".
    pub status: String,

    /// Whether the scheme store answered.
    pub store: bool,

    /// Configured store backend: "postgres" or "memory".
    pub backend: String,

    /// Service version.
    pub version: String,

    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_created_sets_status_and_header() {
        let req = TestRequest::default().to_http_request();
        let response = SchemeResponse::created(vec![1, 2, 3], "Scheme added successfully.")
            .respond_to(&req);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(MESSAGE_HEADER).unwrap(),
            "Scheme added successfully."
        );
    }

    #[test]
    fn test_message_header_keeps_utf8() {
        let value = message_header_value("Schemes with type \"Pensión\" retrieved from database.")
            .unwrap();
        assert_eq!(
            std::str::from_utf8(value.as_bytes()).unwrap(),
            "Schemes with type \"Pensión\" retrieved from database."
        );
    }

    #[test]
    fn test_message_header_drops_control_characters() {
        let value = message_header_value("Schemes with type \"a\nb\" retrieved from database.")
            .unwrap();
        assert_eq!(value, "Schemes with type \"ab\" retrieved from database.");
    }
}
