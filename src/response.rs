//! HTTP responses returned by hooks and handlers.
//!
//! A hook signals "continue" by returning `None`; any `Some(HttpResponse)` ends
//! the pipeline. The server adapter serves string bodies as `text/plain`,
//! `null` as an empty payload and every other body as JSON.

use http::StatusCode;
use serde_json::Value;

/// Response produced by a hook or handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body. Never absent: empty responses carry `Value::Null`.
    pub body: Value,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// 200 OK
    #[must_use]
    pub fn ok(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::OK, body.into())
    }

    /// 201 Created
    #[must_use]
    pub fn created(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::CREATED, body.into())
    }

    /// 204 No Content
    #[must_use]
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, Value::Null)
    }

    /// 400 Bad Request
    #[must_use]
    pub fn bad_request(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, body.into())
    }

    /// 401 Unauthorized
    #[must_use]
    pub fn unauthorized(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, body.into())
    }

    /// 403 Forbidden
    #[must_use]
    pub fn forbidden(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::FORBIDDEN, body.into())
    }

    /// 404 Not Found
    #[must_use]
    pub fn not_found(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::NOT_FOUND, body.into())
    }

    /// 405 Method Not Allowed
    #[must_use]
    pub fn method_not_allowed(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, body.into())
    }

    /// 409 Conflict
    #[must_use]
    pub fn conflict(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::CONFLICT, body.into())
    }

    /// 500 Internal Server Error
    #[must_use]
    pub fn internal_server_error(body: impl Into<Value>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body.into())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}
