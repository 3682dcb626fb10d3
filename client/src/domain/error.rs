//! User-facing error taxonomy.
//!
//! A [`DomainError`] is the classified, typed representation of a failed
//! operation, decoupled from raw transport status codes. Workflows store
//! one in their failure state and discard it when they transition away;
//! presentation renders the title/message/detail/hint fields directly.

use thiserror::Error;

/// Closed set of failure categories.
///
/// The classifier maps every transport outcome to exactly one of these, so
/// the mapping is exhaustively testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server refused the request under its rate-limit accounting.
    RateLimited,
    /// The requested resource (or any claimable coupon) does not exist.
    NotFound,
    /// Authentication failed or the session credential has lapsed.
    Unauthorized,
    /// The server rejected the request payload.
    Validation,
    /// The server failed, or returned an unreadable success payload.
    ServerError,
    /// Transport-level failure or an unmapped status.
    Unknown,
}

/// Classified failure payload surfaced to observers.
///
/// Immutable once built: constructed exactly once per failed outcome and
/// discarded when the owning workflow leaves its failure state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct DomainError {
    kind: ErrorKind,
    title: String,
    message: String,
    detail: Option<String>,
    retry_hint: Option<String>,
}

impl DomainError {
    /// Create an error with the given category, title, and message.
    #[must_use]
    pub fn new(kind: ErrorKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            detail: None,
            retry_hint: None,
        }
    }

    /// Attach a supplementary detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a hint telling the user how to retry.
    #[must_use]
    pub fn with_retry_hint(mut self, hint: impl Into<String>) -> Self {
        self.retry_hint = Some(hint.into());
        self
    }

    /// Replace the title, keeping classification and message.
    ///
    /// Workflows use this to phrase a failure with the attempted action
    /// ("Failed to disable coupon") without re-classifying it.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Short human label for the failure.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Human-readable message; server-supplied wording when available.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary detail line, when one applies.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Retry guidance, when one applies.
    #[must_use]
    pub fn retry_hint(&self) -> Option<&str> {
        self.retry_hint.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn builders_attach_optional_fields() {
        let error = DomainError::new(ErrorKind::RateLimited, "Rate Limit Exceeded", "slow down")
            .with_detail("fair distribution")
            .with_retry_hint("try tomorrow");

        assert_eq!(error.kind(), ErrorKind::RateLimited);
        assert_eq!(error.title(), "Rate Limit Exceeded");
        assert_eq!(error.message(), "slow down");
        assert_eq!(error.detail(), Some("fair distribution"));
        assert_eq!(error.retry_hint(), Some("try tomorrow"));
    }

    #[test]
    fn with_title_keeps_classification() {
        let error = DomainError::new(ErrorKind::ServerError, "Server Error", "boom")
            .with_title("Failed to disable coupon");
        assert_eq!(error.kind(), ErrorKind::ServerError);
        assert_eq!(error.title(), "Failed to disable coupon");
    }

    #[test]
    fn display_joins_title_and_message() {
        let error = DomainError::new(ErrorKind::Unknown, "Network Error", "check your connection");
        assert_eq!(error.to_string(), "Network Error: check your connection");
    }
}
