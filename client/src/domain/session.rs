//! Session gate driving the admin login interaction.
//!
//! The gate submits credentials exactly as provided — the server owns
//! validation — and tracks only the outcome of the last attempt. Success
//! establishes the ambient cookie credential inside the transport layer;
//! the gate itself holds no session fields. A failed attempt stays on
//! display until the next submission or an explicit reset (there is no
//! auto-dismiss for inline login errors).

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::auth::LoginCredentials;
use super::classify::{RequestContext, classify};
use super::error::DomainError;
use super::ports::{ApiRequest, CouponApi, routes};
use super::workflow::lock;

/// Observable state of the login interaction. Exactly one at any instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No attempt made since creation or the last reset.
    Idle,
    /// A login request is outstanding.
    Pending,
    /// The last attempt succeeded; the credential cookie is in place.
    Authenticated,
    /// The last attempt failed; shown inline until the next attempt.
    Failed(DomainError),
}

struct Inner<T> {
    transport: Arc<T>,
    state: Mutex<SessionState>,
}

/// Drives the admin login interaction.
///
/// Cheap to clone; clones share one state cell.
pub struct SessionGate<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for SessionGate<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: CouponApi + 'static> SessionGate<T> {
    /// Create a gate backed by the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                state: Mutex::new(SessionState::Idle),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        lock(&self.inner.state).clone()
    }

    /// Whether a login request is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(*lock(&self.inner.state), SessionState::Pending)
    }

    /// Whether the last attempt established a session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(*lock(&self.inner.state), SessionState::Authenticated)
    }

    /// Inline error from the last failed attempt, if any.
    #[must_use]
    pub fn error(&self) -> Option<DomainError> {
        match &*lock(&self.inner.state) {
            SessionState::Failed(error) => Some(error.clone()),
            SessionState::Idle | SessionState::Pending | SessionState::Authenticated => None,
        }
    }

    /// Submit credentials. Ignored while an attempt is already
    /// outstanding; entering pending clears any prior inline error.
    pub async fn login(&self, credentials: &LoginCredentials) {
        {
            let mut state = lock(&self.inner.state);
            if matches!(*state, SessionState::Pending) {
                debug!("login ignored while pending");
                return;
            }
            *state = SessionState::Pending;
        }

        let request = ApiRequest::post(routes::ADMIN_LOGIN).with_body(credentials.request_body());
        let outcome = self.inner.transport.send(request).await;

        let next = match &outcome {
            Ok(response) if response.is_success() => {
                debug!(username = credentials.username(), "login succeeded");
                SessionState::Authenticated
            }
            failed => {
                let error = classify(failed, RequestContext::Login);
                warn!(%error, "login failed");
                SessionState::Failed(error)
            }
        };
        *lock(&self.inner.state) = next;
    }

    /// Drop back to idle, clearing any inline error (navigation away).
    pub fn reset(&self) {
        *lock(&self.inner.state) = SessionState::Idle;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
