//! Admin roster workflow: list, create, and toggle coupons.
//!
//! One shared snapshot, three independently pending operations. Fetch
//! failures surface as a sticky load error (cleared by the next successful
//! refresh), while create/toggle outcomes surface as timed banners — one
//! success slot and one failure slot, a new banner replacing the prior one
//! regardless of its remaining display time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};

use super::classify::{RequestContext, classify, malformed_payload};
use super::coupon::{Coupon, CouponCode};
use super::error::DomainError;
use super::ports::{ApiRequest, CouponApi, routes};
use super::workflow::{DismissTimer, lock, schedule_dismiss};

/// How long success and failure banners stay visible.
pub const NOTICE_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

/// Which roster operation produced a notice.
///
/// Refresh outcomes never appear here: fetch failures surface as the
/// sticky load error instead of a timed banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOperation {
    /// Creating a coupon.
    Add,
    /// Flipping a coupon's status.
    Toggle,
}

/// Timed banner reporting a completed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessNotice {
    operation: RosterOperation,
    message: String,
}

impl SuccessNotice {
    /// Operation that produced the banner.
    #[must_use]
    pub const fn operation(&self) -> RosterOperation {
        self.operation
    }

    /// Display message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Timed banner reporting a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    operation: RosterOperation,
    error: DomainError,
}

impl FailureNotice {
    /// Operation that produced the banner.
    #[must_use]
    pub const fn operation(&self) -> RosterOperation {
        self.operation
    }

    /// Classified error carrying the display copy.
    #[must_use]
    pub const fn error(&self) -> &DomainError {
        &self.error
    }
}

/// Read-only view of the roster workflow's observable state.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    coupons: Vec<Coupon>,
    refreshing: bool,
    adding: bool,
    toggling: bool,
    load_error: Option<DomainError>,
    success: Option<SuccessNotice>,
    failure: Option<FailureNotice>,
    dialog_open: bool,
    draft_code: String,
}

impl RosterSnapshot {
    /// Coupons in server response order.
    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        self.coupons.as_slice()
    }

    /// Whether a roster fetch is outstanding.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Whether a coupon creation is outstanding.
    #[must_use]
    pub const fn is_adding(&self) -> bool {
        self.adding
    }

    /// Whether a status toggle is outstanding.
    #[must_use]
    pub const fn is_toggling(&self) -> bool {
        self.toggling
    }

    /// Sticky fetch error; `None` with an empty roster means the roster
    /// really is empty.
    #[must_use]
    pub const fn load_error(&self) -> Option<&DomainError> {
        self.load_error.as_ref()
    }

    /// Currently displayed success banner, if any.
    #[must_use]
    pub const fn success_notice(&self) -> Option<&SuccessNotice> {
        self.success.as_ref()
    }

    /// Currently displayed failure banner, if any.
    #[must_use]
    pub const fn failure_notice(&self) -> Option<&FailureNotice> {
        self.failure.as_ref()
    }

    /// Whether the creation dialog is open.
    #[must_use]
    pub const fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Admin's in-progress code input.
    #[must_use]
    pub fn draft_code(&self) -> &str {
        self.draft_code.as_str()
    }
}

struct RosterCell {
    view: RosterSnapshot,
    success_timer: DismissTimer,
    failure_timer: DismissTimer,
}

struct Inner<T> {
    transport: Arc<T>,
    cell: Mutex<RosterCell>,
}

/// Drives the admin roster interactions over one shared snapshot.
///
/// Cheap to clone; clones share one state cell.
pub struct RosterWorkflow<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for RosterWorkflow<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: CouponApi + 'static> RosterWorkflow<T> {
    /// Create a workflow backed by the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                cell: Mutex::new(RosterCell {
                    view: RosterSnapshot::default(),
                    success_timer: DismissTimer::default(),
                    failure_timer: DismissTimer::default(),
                }),
            }),
        }
    }

    /// Snapshot of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> RosterSnapshot {
        lock(&self.inner.cell).view.clone()
    }

    /// Fetch the roster and replace the snapshot wholesale.
    ///
    /// A duplicate call while a fetch is outstanding is a no-op. On
    /// failure the previous snapshot is left untouched and a sticky load
    /// error is surfaced instead.
    pub async fn refresh(&self) {
        {
            let mut cell = lock(&self.inner.cell);
            if cell.view.refreshing {
                debug!("refresh ignored while pending");
                return;
            }
            cell.view.refreshing = true;
        }

        let outcome = self
            .inner
            .transport
            .send(ApiRequest::get(routes::ADMIN_COUPONS))
            .await;

        let mut cell = lock(&self.inner.cell);
        cell.view.refreshing = false;
        match &outcome {
            Ok(response) if response.is_success() => match response.decode::<Vec<Coupon>>() {
                Some(coupons) => {
                    debug!(count = coupons.len(), "roster replaced");
                    cell.view.coupons = coupons;
                    cell.view.load_error = None;
                }
                None => {
                    cell.view.load_error =
                        Some(malformed_payload(RequestContext::ListCoupons));
                }
            },
            failed => {
                let error = classify(failed, RequestContext::ListCoupons);
                warn!(%error, "roster fetch failed");
                cell.view.load_error = Some(error);
            }
        }
    }

    /// Create a coupon with the given code.
    ///
    /// Blank codes are rejected locally: no request is sent and the state
    /// is untouched. On success the creation dialog closes, the draft
    /// clears, a success banner appears, and the roster is refreshed. On
    /// failure the draft and dialog are preserved for correction.
    pub async fn add_coupon(&self, code: &str) {
        let Ok(new_code) = CouponCode::new(code) else {
            debug!("blank coupon code; nothing submitted");
            return;
        };
        {
            let mut cell = lock(&self.inner.cell);
            if cell.view.adding {
                debug!("add ignored while pending");
                return;
            }
            cell.view.adding = true;
        }

        let request = ApiRequest::post(routes::ADMIN_COUPONS)
            .with_body(json!({ "code": new_code.as_str() }));
        let outcome = self.inner.transport.send(request).await;

        match &outcome {
            Ok(response) if response.is_success() => {
                {
                    let mut cell = lock(&self.inner.cell);
                    cell.view.adding = false;
                    cell.view.dialog_open = false;
                    cell.view.draft_code.clear();
                }
                self.publish_success(
                    RosterOperation::Add,
                    format!("Coupon \"{new_code}\" was added successfully!"),
                );
                self.refresh().await;
            }
            failed => {
                lock(&self.inner.cell).view.adding = false;
                let error = classify(failed, RequestContext::AddCoupon)
                    .with_title("Failed to add coupon");
                self.publish_failure(RosterOperation::Add, error);
            }
        }
    }

    /// Flip a coupon's active status.
    ///
    /// The success banner is phrased with the resulting state inferred
    /// from `currently_active` (toggle flips it); the failure banner is
    /// phrased with the attempted action.
    pub async fn toggle_status(&self, id: &str, currently_active: bool, code: &str) {
        {
            let mut cell = lock(&self.inner.cell);
            if cell.view.toggling {
                debug!("toggle ignored while pending");
                return;
            }
            cell.view.toggling = true;
        }

        let outcome = self
            .inner
            .transport
            .send(ApiRequest::patch(routes::admin_coupon_toggle(id)))
            .await;

        match &outcome {
            Ok(response) if response.is_success() => {
                lock(&self.inner.cell).view.toggling = false;
                let resulting = if currently_active { "disabled" } else { "enabled" };
                self.publish_success(
                    RosterOperation::Toggle,
                    format!("Coupon \"{code}\" was {resulting} successfully!"),
                );
                self.refresh().await;
            }
            failed => {
                lock(&self.inner.cell).view.toggling = false;
                let attempted = if currently_active { "disable" } else { "enable" };
                let error = classify(failed, RequestContext::ToggleCoupon)
                    .with_title(format!("Failed to {attempted} coupon"))
                    .with_detail(
                        "The server could not process your request. \
                         Please try again or check your connection.",
                    );
                self.publish_failure(RosterOperation::Toggle, error);
            }
        }
    }

    /// Open the coupon creation dialog.
    pub fn open_dialog(&self) {
        lock(&self.inner.cell).view.dialog_open = true;
    }

    /// Close the coupon creation dialog, keeping any draft input.
    pub fn close_dialog(&self) {
        lock(&self.inner.cell).view.dialog_open = false;
    }

    /// Record the admin's in-progress code input.
    pub fn set_draft(&self, code: &str) {
        let mut cell = lock(&self.inner.cell);
        cell.view.draft_code.clear();
        cell.view.draft_code.push_str(code);
    }

    /// Dismiss the success banner immediately.
    pub fn dismiss_success(&self) {
        let mut cell = lock(&self.inner.cell);
        cell.success_timer.supersede();
        cell.view.success = None;
    }

    /// Dismiss the failure banner immediately.
    pub fn dismiss_failure(&self) {
        let mut cell = lock(&self.inner.cell);
        cell.failure_timer.supersede();
        cell.view.failure = None;
    }

    fn publish_success(&self, operation: RosterOperation, message: String) {
        debug!(?operation, %message, "operation succeeded");
        let mut cell = lock(&self.inner.cell);
        cell.view.success = Some(SuccessNotice { operation, message });
        schedule_dismiss(
            &mut cell.success_timer,
            NOTICE_DISPLAY_WINDOW,
            &self.inner,
            |inner, epoch| inner.clear_success_if(epoch),
        );
    }

    fn publish_failure(&self, operation: RosterOperation, error: DomainError) {
        warn!(?operation, %error, "operation failed");
        let mut cell = lock(&self.inner.cell);
        cell.view.failure = Some(FailureNotice { operation, error });
        schedule_dismiss(
            &mut cell.failure_timer,
            NOTICE_DISPLAY_WINDOW,
            &self.inner,
            |inner, epoch| inner.clear_failure_if(epoch),
        );
    }
}

impl<T: CouponApi + 'static> Inner<T> {
    fn clear_success_if(&self, epoch: u64) {
        let mut cell = lock(&self.cell);
        if cell.success_timer.epoch() != epoch {
            return;
        }
        cell.view.success = None;
    }

    fn clear_failure_if(&self, epoch: u64) {
        let mut cell = lock(&self.cell);
        if cell.failure_timer.epoch() != epoch {
            return;
        }
        cell.view.failure = None;
    }
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
