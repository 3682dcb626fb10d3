//! Domain core for the coupon client.
//!
//! Purpose: define the entities, the typed error taxonomy, the transport
//! port, and the workflow state machines that orchestrate the claim and
//! administration interactions. Everything here is transport-agnostic;
//! adapters live under `crate::outbound`.
//!
//! Public surface:
//! - `Coupon`, `CouponCode`, `ClaimResult` — roster and claim entities.
//! - `LoginCredentials` — admin credentials, submitted as provided.
//! - `DomainError`, `ErrorKind` — classified failure payloads.
//! - `classify`, `RequestContext` — the status-to-error mapping.
//! - `CouponApi` and friends (`ports`) — the driven transport port.
//! - `ClaimWorkflow`, `RosterWorkflow`, `SessionGate` — the state machines.

pub mod auth;
pub mod classify;
pub mod claim;
pub mod coupon;
pub mod error;
pub mod ports;
pub mod roster;
pub mod session;

pub(crate) mod workflow;

#[cfg(test)]
pub(crate) mod test_api;

pub use self::auth::LoginCredentials;
pub use self::claim::{ClaimState, ClaimWorkflow};
pub use self::classify::{RequestContext, classify, malformed_payload};
pub use self::coupon::{ClaimResult, Coupon, CouponCode, CouponCodeValidationError};
pub use self::error::{DomainError, ErrorKind};
pub use self::roster::{
    FailureNotice, RosterOperation, RosterSnapshot, RosterWorkflow, SuccessNotice,
};
pub use self::session::{SessionGate, SessionState};
