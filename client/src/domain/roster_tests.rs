//! Regression coverage for the roster workflow.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::Notify;

use super::*;
use crate::domain::ErrorKind;
use crate::domain::ports::{ApiMethod, TransportError};
use crate::domain::test_api::{ScriptedApi, advance, coupon_json, ok_empty, ok_json, wait_for_calls};

fn roster_body(entries: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::Value::Array(entries)
}

#[tokio::test(start_paused = true)]
async fn refresh_replaces_the_snapshot_wholesale() {
    let api = ScriptedApi::with(vec![
        ok_json(
            200,
            roster_body(vec![
                coupon_json("c1", "SUMMER25", true, &["a"]),
                coupon_json("c2", "WINTER10", false, &[]),
            ]),
        ),
        ok_json(200, roster_body(vec![coupon_json("c3", "SPRING5", true, &[])])),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.refresh().await;
    let first = roster.snapshot();
    assert_eq!(first.coupons().len(), 2);
    assert_eq!(first.coupons()[0].code(), "SUMMER25");
    assert_eq!(first.coupons()[0].claim_count(), 1);
    assert!(first.load_error().is_none());

    roster.refresh().await;
    let second = roster.snapshot();
    assert_eq!(second.coupons().len(), 1);
    assert_eq!(second.coupons()[0].code(), "SPRING5");
}

#[tokio::test(start_paused = true)]
async fn refresh_failure_keeps_the_previous_snapshot() {
    let api = ScriptedApi::with(vec![
        ok_json(200, roster_body(vec![coupon_json("c1", "SUMMER25", true, &[])])),
        ok_empty(500),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.refresh().await;
    roster.refresh().await;

    let snapshot = roster.snapshot();
    assert_eq!(snapshot.coupons().len(), 1, "snapshot must survive the failure");
    let error = snapshot.load_error().expect("failure must surface");
    assert_eq!(error.kind(), ErrorKind::ServerError);
}

#[tokio::test(start_paused = true)]
async fn empty_roster_is_a_success_distinct_from_a_load_error() {
    let api = ScriptedApi::with(vec![
        ok_empty(503),
        ok_json(200, roster_body(Vec::new())),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.refresh().await;
    assert!(roster.snapshot().load_error().is_some());

    roster.refresh().await;
    let snapshot = roster.snapshot();
    assert!(snapshot.coupons().is_empty());
    assert!(snapshot.load_error().is_none(), "success must clear the sticky error");
}

#[tokio::test(start_paused = true)]
async fn duplicate_refresh_while_pending_issues_one_request() {
    let gate = Arc::new(Notify::new());
    let api = ScriptedApi::gated(
        vec![ok_json(200, roster_body(vec![coupon_json("c1", "SUMMER25", true, &[])]))],
        Arc::clone(&gate),
    );
    let roster = RosterWorkflow::new(Arc::clone(&api));

    let background = tokio::spawn({
        let roster = roster.clone();
        async move { roster.refresh().await }
    });
    wait_for_calls(&api, 1).await;
    assert!(roster.snapshot().is_refreshing());

    roster.refresh().await;
    assert_eq!(api.call_count(), 1, "duplicate refresh must not issue a request");

    gate.notify_one();
    background.await.expect("refresh task");
    assert_eq!(roster.snapshot().coupons().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_codes_are_rejected_locally() {
    let api = ScriptedApi::with(Vec::new());
    let roster = RosterWorkflow::new(Arc::clone(&api));
    roster.set_draft("   ");
    roster.open_dialog();

    roster.add_coupon("").await;
    roster.add_coupon("   ").await;

    assert_eq!(api.call_count(), 0, "no request may be sent for blank codes");
    let snapshot = roster.snapshot();
    assert!(snapshot.success_notice().is_none());
    assert!(snapshot.failure_notice().is_none());
    assert_eq!(snapshot.draft_code(), "   ", "draft must be untouched");
    assert!(snapshot.dialog_open());
}

#[tokio::test(start_paused = true)]
async fn successful_add_closes_the_dialog_and_refreshes() {
    let api = ScriptedApi::with(vec![
        ok_json(201, coupon_json("c9", "SPRING5", true, &[])),
        ok_json(200, roster_body(vec![coupon_json("c9", "SPRING5", true, &[])])),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));
    roster.open_dialog();
    roster.set_draft("SPRING5");

    roster.add_coupon("SPRING5").await;

    let snapshot = roster.snapshot();
    let notice = snapshot.success_notice().expect("success banner expected");
    assert_eq!(notice.operation(), RosterOperation::Add);
    assert_eq!(notice.message(), "Coupon \"SPRING5\" was added successfully!");
    assert!(!snapshot.dialog_open());
    assert_eq!(snapshot.draft_code(), "");
    assert_eq!(snapshot.coupons().len(), 1, "add must trigger a refresh");

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method(), ApiMethod::Post);
    assert_eq!(calls[0].body(), Some(&json!({ "code": "SPRING5" })));
    assert_eq!(calls[1].method(), ApiMethod::Get);
}

#[tokio::test(start_paused = true)]
async fn failed_add_preserves_the_draft_for_correction() {
    let api = ScriptedApi::with(vec![ok_json(
        400,
        json!({ "message": "Coupon code already exists" }),
    )]);
    let roster = RosterWorkflow::new(Arc::clone(&api));
    roster.open_dialog();
    roster.set_draft("SPRING5");

    roster.add_coupon("SPRING5").await;

    let snapshot = roster.snapshot();
    let notice = snapshot.failure_notice().expect("failure banner expected");
    assert_eq!(notice.operation(), RosterOperation::Add);
    assert_eq!(notice.error().kind(), ErrorKind::Validation);
    assert_eq!(notice.error().message(), "Coupon code already exists");
    assert_eq!(snapshot.draft_code(), "SPRING5", "draft must survive the failure");
    assert!(snapshot.dialog_open(), "dialog must stay open for correction");
    assert_eq!(api.call_count(), 1, "a failed add must not refresh");
}

#[tokio::test(start_paused = true)]
async fn toggle_success_is_phrased_with_the_resulting_state() {
    let api = ScriptedApi::with(vec![
        ok_empty(200),
        ok_json(200, roster_body(Vec::new())),
        ok_empty(200),
        ok_json(200, roster_body(Vec::new())),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.toggle_status("c1", true, "SUMMER25").await;
    let disabled = roster.snapshot();
    let notice = disabled.success_notice().expect("success banner expected");
    assert_eq!(notice.operation(), RosterOperation::Toggle);
    assert_eq!(notice.message(), "Coupon \"SUMMER25\" was disabled successfully!");

    roster.toggle_status("c1", false, "SUMMER25").await;
    let enabled = roster.snapshot();
    let notice = enabled.success_notice().expect("success banner expected");
    assert_eq!(notice.message(), "Coupon \"SUMMER25\" was enabled successfully!");

    let calls = api.calls();
    assert_eq!(calls[0].method(), ApiMethod::Patch);
    assert_eq!(calls[0].path(), "/api/admin/coupons/c1/toggle");
    assert!(calls[0].body().is_none());
}

#[tokio::test(start_paused = true)]
async fn toggle_failure_is_phrased_with_the_attempted_action() {
    let api = ScriptedApi::with(vec![Err(TransportError::network("connection reset"))]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.toggle_status("c1", true, "SUMMER25").await;

    let snapshot = roster.snapshot();
    let notice = snapshot.failure_notice().expect("failure banner expected");
    assert_eq!(notice.operation(), RosterOperation::Toggle);
    assert_eq!(notice.error().title(), "Failed to disable coupon");
    assert_eq!(
        notice.error().detail(),
        Some("The server could not process your request. Please try again or check your connection.")
    );
    assert_eq!(api.call_count(), 1, "a failed toggle must not refresh");
}

#[tokio::test(start_paused = true)]
async fn banners_auto_dismiss_after_their_window() {
    let api = ScriptedApi::with(vec![ok_empty(200), ok_json(200, roster_body(Vec::new()))]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.toggle_status("c1", true, "SUMMER25").await;
    assert!(roster.snapshot().success_notice().is_some());

    advance(Duration::from_secs(4)).await;
    assert!(roster.snapshot().success_notice().is_some());
    advance(Duration::from_secs(2)).await;
    assert!(roster.snapshot().success_notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn a_new_banner_replaces_the_prior_and_restarts_its_window() {
    let api = ScriptedApi::with(vec![
        ok_empty(200),
        ok_json(200, roster_body(Vec::new())),
        ok_empty(200),
        ok_json(200, roster_body(Vec::new())),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.toggle_status("c1", true, "SUMMER25").await;
    advance(Duration::from_secs(3)).await;
    roster.toggle_status("c2", false, "WINTER10").await;

    // Three seconds into the second banner's window the first would have
    // expired; the replacement must still be visible.
    advance(Duration::from_secs(3)).await;
    let snapshot = roster.snapshot();
    let notice = snapshot.success_notice().expect("replacement banner expected");
    assert!(notice.message().contains("WINTER10"), "message: {}", notice.message());

    advance(Duration::from_secs(3)).await;
    assert!(roster.snapshot().success_notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn success_and_failure_banners_dismiss_independently() {
    let api = ScriptedApi::with(vec![
        ok_empty(200),
        ok_json(200, roster_body(Vec::new())),
    ]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.toggle_status("c1", true, "SUMMER25").await;
    advance(Duration::from_secs(3)).await;

    api.queue(ok_json(400, json!({ "message": "bad code" })));
    roster.add_coupon("SPRING5").await;

    // The failure banner arrived three seconds later; the success banner
    // expires first while the failure one stays.
    advance(Duration::from_secs(3)).await;
    let snapshot = roster.snapshot();
    assert!(snapshot.success_notice().is_none());
    assert!(snapshot.failure_notice().is_some());

    advance(Duration::from_secs(3)).await;
    assert!(roster.snapshot().failure_notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn explicit_dismiss_clears_a_banner_immediately() {
    let api = ScriptedApi::with(vec![ok_empty(200), ok_json(200, roster_body(Vec::new()))]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.toggle_status("c1", true, "SUMMER25").await;
    roster.dismiss_success();
    assert!(roster.snapshot().success_notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn unreadable_roster_payload_is_a_sticky_server_error() {
    let api = ScriptedApi::with(vec![ok_json(200, json!({ "not": "a roster" }))]);
    let roster = RosterWorkflow::new(Arc::clone(&api));

    roster.refresh().await;
    let snapshot = roster.snapshot();
    let error = snapshot.load_error().expect("malformed payload must surface");
    assert_eq!(error.kind(), ErrorKind::ServerError);
}
