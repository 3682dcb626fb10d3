//! Status-driven classification of failed requests.
//!
//! Pure mapping from a transport outcome to a [`DomainError`]. The mapping
//! is total: every status/transport-failure combination yields exactly one
//! error, and unmatched statuses fall through to [`ErrorKind::Unknown`]
//! rather than panicking. A server-supplied body `message` is preferred
//! verbatim when present.

use super::error::{DomainError, ErrorKind};
use super::ports::{ApiOutcome, ApiResponse, TransportError};

/// Which interaction produced the outcome; disambiguates wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestContext {
    /// Anonymous visitor claiming a coupon.
    Claim,
    /// Admin fetching the roster.
    ListCoupons,
    /// Admin creating a coupon.
    AddCoupon,
    /// Admin flipping a coupon's status.
    ToggleCoupon,
    /// Admin submitting credentials.
    Login,
}

impl RequestContext {
    const fn default_title(self) -> &'static str {
        match self {
            Self::Claim => "Error",
            Self::ListCoupons => "Could not load coupons",
            Self::AddCoupon => "Failed to add coupon",
            Self::ToggleCoupon => "Failed to update coupon",
            Self::Login => "Login failed",
        }
    }

    const fn default_message(self) -> &'static str {
        match self {
            Self::Claim => "Error claiming coupon",
            Self::ListCoupons => "Failed to load coupons.",
            Self::AddCoupon => "Failed to add coupon",
            Self::ToggleCoupon => "Failed to update coupon",
            Self::Login => "Login failed",
        }
    }
}

/// Map a failed outcome to a classified error.
///
/// Callers route every non-2xx response and every transport failure
/// through here; a stray success outcome falls through to the
/// [`ErrorKind::Unknown`] catch-all like any other unmapped status.
#[must_use]
pub fn classify(outcome: &ApiOutcome, context: RequestContext) -> DomainError {
    match outcome {
        Err(failure) => transport_failure(failure, context),
        Ok(response) => status_failure(response, context),
    }
}

/// Defensive default for an unreadable body on a nominal-success status.
#[must_use]
pub fn malformed_payload(context: RequestContext) -> DomainError {
    DomainError::new(
        ErrorKind::ServerError,
        "Server Error",
        "The server returned an unreadable response. Please try again in a few minutes.",
    )
    .with_detail(context.default_message())
}

fn status_failure(response: &ApiResponse, context: RequestContext) -> DomainError {
    let server_message = response.message();
    match response.status() {
        429 => rate_limited(server_message, context),
        404 => not_found(server_message, context),
        401 | 403 => unauthorized(server_message, context),
        status if status >= 500 => server_error(server_message),
        status if status >= 400 => validation(server_message, context),
        status => unknown_status(status, server_message, context),
    }
}

fn message_or(server_message: Option<&str>, fallback: &str) -> String {
    server_message.unwrap_or(fallback).to_owned()
}

fn rate_limited(server_message: Option<&str>, context: RequestContext) -> DomainError {
    let message = message_or(server_message, context.default_message());
    let error = DomainError::new(ErrorKind::RateLimited, "Rate Limit Exceeded", message);
    if mentions_time_window(server_message) {
        error
            .with_detail("Our system prevents excessive requests to ensure fair distribution.")
            .with_retry_hint(
                "Try again in the time specified. Each IP address is limited to one coupon per day.",
            )
    } else {
        error
            .with_detail("Each browser session is limited to one coupon per day.")
            .with_retry_hint("Try using a different browser or device if you need another coupon.")
    }
}

// Server rate-limit messages state their window in hours.
fn mentions_time_window(server_message: Option<&str>) -> bool {
    server_message.is_some_and(|message| message.to_ascii_lowercase().contains("hour"))
}

fn not_found(server_message: Option<&str>, context: RequestContext) -> DomainError {
    if matches!(context, RequestContext::Claim) {
        return DomainError::new(
            ErrorKind::NotFound,
            "No Coupons Available",
            "All coupons have been claimed for now. Please check back later.",
        )
        .with_retry_hint("Our admin will add more coupons soon. Check back in a few hours.");
    }
    DomainError::new(
        ErrorKind::NotFound,
        context.default_title(),
        message_or(server_message, "The requested resource was not found."),
    )
}

fn unauthorized(server_message: Option<&str>, context: RequestContext) -> DomainError {
    if matches!(context, RequestContext::Login) {
        return DomainError::new(
            ErrorKind::Unauthorized,
            "Login failed",
            message_or(server_message, "Invalid username or password."),
        );
    }
    DomainError::new(
        ErrorKind::Unauthorized,
        "Session expired",
        message_or(
            server_message,
            "Your admin session has expired. Please log in again.",
        ),
    )
}

fn server_error(server_message: Option<&str>) -> DomainError {
    DomainError::new(
        ErrorKind::ServerError,
        "Server Error",
        message_or(
            server_message,
            "Our servers are experiencing issues. Please try again in a few minutes.",
        ),
    )
    .with_retry_hint("If the problem persists, contact our support team at support@example.com")
}

fn validation(server_message: Option<&str>, context: RequestContext) -> DomainError {
    let error = DomainError::new(
        ErrorKind::Validation,
        context.default_title(),
        message_or(server_message, context.default_message()),
    );
    if matches!(context, RequestContext::AddCoupon) {
        error
            .with_detail("The code may already exist or be invalid.")
            .with_retry_hint("Try a different coupon code or check if it already exists.")
    } else {
        error
    }
}

fn unknown_status(status: u16, server_message: Option<&str>, context: RequestContext) -> DomainError {
    DomainError::new(
        ErrorKind::Unknown,
        context.default_title(),
        message_or(
            server_message,
            &format!("Unexpected response from the server (status {status})."),
        ),
    )
}

fn transport_failure(failure: &TransportError, context: RequestContext) -> DomainError {
    DomainError::new(
        ErrorKind::Unknown,
        context.default_title(),
        "Please check your network connection and try again.",
    )
    .with_detail(format!("network: {failure}"))
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
