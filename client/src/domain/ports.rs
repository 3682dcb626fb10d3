//! Driven port for the coupon service transport.
//!
//! The port exposes one operation — send a request, report its outcome —
//! with strongly typed request/response values so adapters stay thin.
//! Implementations attach the ambient credential cookie, never retry, and
//! never interpret status codes: that is the classifier's job.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Paths of the consumed REST endpoints.
pub mod routes {
    /// Public claim endpoint; rate-limited by the server.
    pub const CLAIM: &str = "/api/coupons/claim";
    /// Admin login endpoint; success sets the session cookie.
    pub const ADMIN_LOGIN: &str = "/api/admin/login";
    /// Admin roster endpoint: GET lists, POST creates.
    pub const ADMIN_COUPONS: &str = "/api/admin/coupons";

    /// Toggle endpoint flipping one coupon's active status.
    #[must_use]
    pub fn admin_coupon_toggle(id: &str) -> String {
        format!("/api/admin/coupons/{id}/toggle")
    }
}

/// HTTP method subset used by the coupon API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    /// Read a resource.
    Get,
    /// Create a resource or submit an action.
    Post,
    /// Partially update a resource.
    Patch,
}

/// One request handed to the transport adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: ApiMethod,
    path: String,
    body: Option<Value>,
}

impl ApiRequest {
    /// Build a GET request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Get, path)
    }

    /// Build a POST request for `path` with no payload.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Post, path)
    }

    /// Build a PATCH request for `path` with no payload.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Patch, path)
    }

    /// Attach a JSON payload.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> ApiMethod {
        self.method
    }

    /// Request path relative to the service base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// JSON payload, when one is attached.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Response body after JSON classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The server sent no bytes.
    Empty,
    /// A parsed JSON document.
    Json(Value),
    /// Non-empty bytes that failed to parse as JSON.
    Malformed,
}

impl ResponseBody {
    /// Classify raw response bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        serde_json::from_slice(bytes).map_or(Self::Malformed, Self::Json)
    }
}

/// Status code and classified body of one response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    body: ResponseBody,
}

impl ApiResponse {
    /// Build a response from its parts.
    #[must_use]
    pub const fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// Convenience constructor for a JSON response.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self::new(status, ResponseBody::Json(body))
    }

    /// Convenience constructor for a bodyless response.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self::new(status, ResponseBody::Empty)
    }

    /// Numeric HTTP status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the success range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Classified body.
    #[must_use]
    pub const fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Human message supplied by the server, when the body carries one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Json(value) => value.get("message").and_then(Value::as_str),
            ResponseBody::Empty | ResponseBody::Malformed => None,
        }
    }

    /// Decode the JSON body into a typed payload.
    ///
    /// Returns `None` when the body is absent, malformed, or of the wrong
    /// shape; callers treat that as an unreadable success payload.
    #[must_use]
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone()).ok(),
            ResponseBody::Empty | ResponseBody::Malformed => None,
        }
    }
}

/// Network-level failures surfaced by the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded the adapter's timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Adapter-supplied description of the timeout.
        message: String,
    },
    /// DNS, connection, or protocol failure before a status was received.
    #[error("network failure: {message}")]
    Network {
        /// Adapter-supplied description of the failure.
        message: String,
    },
}

impl TransportError {
    /// Helper for timeout failures.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for other network failures.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}

/// Outcome of one transport send.
pub type ApiOutcome = Result<ApiResponse, TransportError>;

/// Port issuing authenticated requests against the coupon service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponApi: Send + Sync {
    /// Issue one request and report its outcome. Never retries.
    async fn send(&self, request: ApiRequest) -> ApiOutcome;
}
