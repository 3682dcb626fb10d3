//! Scripted transport fixture shared by the workflow tests.
//!
//! Plays back a queue of canned outcomes, records every request, and can
//! optionally park each send on a [`Notify`] gate so tests can observe
//! pending states deterministically.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Notify;

use super::ports::{ApiOutcome, ApiRequest, ApiResponse, CouponApi};

pub(crate) struct ScriptedApi {
    outcomes: Mutex<VecDeque<ApiOutcome>>,
    calls: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedApi {
    pub(crate) fn with(outcomes: Vec<ApiOutcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Like [`Self::with`], but every send parks until the gate is
    /// notified once.
    pub(crate) fn gated(outcomes: Vec<ApiOutcome>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    pub(crate) fn queue(&self, outcome: ApiOutcome) {
        self.outcomes
            .lock()
            .expect("outcome queue lock")
            .push_back(outcome);
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().expect("call log lock").clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().expect("call log lock").len()
    }
}

#[async_trait]
impl CouponApi for ScriptedApi {
    async fn send(&self, request: ApiRequest) -> ApiOutcome {
        self.calls.lock().expect("call log lock").push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcomes
            .lock()
            .expect("outcome queue lock")
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::empty(200)))
    }
}

pub(crate) fn ok_json(status: u16, body: Value) -> ApiOutcome {
    Ok(ApiResponse::json(status, body))
}

pub(crate) fn ok_empty(status: u16) -> ApiOutcome {
    Ok(ApiResponse::empty(status))
}

pub(crate) fn coupon_json(id: &str, code: &str, is_active: bool, claims: &[&str]) -> Value {
    json!({
        "_id": id,
        "code": code,
        "isActive": is_active,
        "claimedBy": claims,
    })
}

/// Advance the paused clock and let any released timer tasks run.
pub(crate) async fn advance(duration: Duration) {
    // Let any just-spawned dismiss task reach its `sleep` and anchor its
    // deadline at the current (pre-advance) clock before we move time.
    tokio::task::yield_now().await;
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

/// Yield until the fixture has observed `count` sends.
pub(crate) async fn wait_for_calls(api: &ScriptedApi, count: usize) {
    while api.call_count() < count {
        tokio::task::yield_now().await;
    }
}
