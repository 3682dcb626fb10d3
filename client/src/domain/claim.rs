//! Single-shot claim workflow.
//!
//! Drives Idle → Pending → (Succeeded | Failed) → Idle. A resolved claim
//! stays on display for a fixed window — longer on success so the visitor
//! can copy the code — then returns to idle unless dismissed first.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use super::classify::{RequestContext, classify, malformed_payload};
use super::coupon::ClaimResult;
use super::error::DomainError;
use super::ports::{ApiRequest, CouponApi, routes};
use super::workflow::{DismissTimer, lock, schedule_dismiss};

/// How long a successful claim stays visible before returning to idle.
pub const SUCCESS_DISPLAY_WINDOW: Duration = Duration::from_secs(15);
/// How long a failed claim stays visible before returning to idle.
pub const FAILURE_DISPLAY_WINDOW: Duration = Duration::from_secs(8);

/// Observable state of the claim interaction. Exactly one at any instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimState {
    /// No claim in flight or on display.
    Idle,
    /// A claim request is outstanding.
    Pending,
    /// The server issued a coupon code.
    Succeeded(ClaimResult),
    /// The claim failed; the classified error carries the display copy.
    Failed(DomainError),
}

struct ClaimCell {
    state: ClaimState,
    timer: DismissTimer,
}

struct Inner<T> {
    transport: Arc<T>,
    cell: Mutex<ClaimCell>,
}

/// Drives the single-shot "claim a coupon" interaction.
///
/// Cheap to clone; clones share one state cell. The server enforces the
/// one-per-window rule — this workflow only issues a single request per
/// invocation and surfaces whatever the server decides.
pub struct ClaimWorkflow<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ClaimWorkflow<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: CouponApi + 'static> ClaimWorkflow<T> {
    /// Create a workflow backed by the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                cell: Mutex::new(ClaimCell {
                    state: ClaimState::Idle,
                    timer: DismissTimer::default(),
                }),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ClaimState {
        lock(&self.inner.cell).state.clone()
    }

    /// Whether a claim request is outstanding.
    ///
    /// Callers use this to disable re-entry; invoking [`Self::claim`]
    /// while pending is a no-op either way.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(lock(&self.inner.cell).state, ClaimState::Pending)
    }

    /// Claim one coupon.
    ///
    /// Issues exactly one POST with no payload beyond the ambient
    /// credential; no implicit retry. Ignored while a claim is already
    /// outstanding.
    pub async fn claim(&self) {
        if !self.inner.begin() {
            debug!("claim ignored while pending");
            return;
        }

        let outcome = self
            .inner
            .transport
            .send(ApiRequest::post(routes::CLAIM))
            .await;

        let next = match &outcome {
            Ok(response) if response.is_success() => response.decode::<ClaimResult>().map_or_else(
                || ClaimState::Failed(malformed_payload(RequestContext::Claim)),
                ClaimState::Succeeded,
            ),
            failed => ClaimState::Failed(classify(failed, RequestContext::Claim)),
        };
        let window = if matches!(next, ClaimState::Succeeded(_)) {
            SUCCESS_DISPLAY_WINDOW
        } else {
            FAILURE_DISPLAY_WINDOW
        };
        debug!(state = ?next, "claim resolved");

        let mut cell = lock(&self.inner.cell);
        cell.state = next;
        schedule_dismiss(&mut cell.timer, window, &self.inner, |inner, epoch| {
            inner.return_to_idle_if(epoch);
        });
    }

    /// Dismiss the displayed result and return to idle immediately.
    pub fn dismiss(&self) {
        let mut cell = lock(&self.inner.cell);
        cell.timer.supersede();
        cell.state = ClaimState::Idle;
    }
}

impl<T: CouponApi + 'static> Inner<T> {
    /// Atomically move Idle/terminal → Pending; false when already pending.
    fn begin(&self) -> bool {
        let mut cell = lock(&self.cell);
        if matches!(cell.state, ClaimState::Pending) {
            return false;
        }
        // A fresh claim supersedes any display window still counting down.
        cell.timer.supersede();
        cell.state = ClaimState::Pending;
        true
    }

    fn return_to_idle_if(&self, epoch: u64) {
        let mut cell = lock(&self.cell);
        if cell.timer.epoch() != epoch {
            return;
        }
        cell.state = ClaimState::Idle;
    }
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
