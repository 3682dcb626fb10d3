//! Client-side orchestration core for the coupon distribution service.
//!
//! The crate is laid out hexagonally: [`domain`] owns the entities, the
//! error taxonomy, the transport port, and the workflow state machines that
//! drive user-visible feedback; [`outbound`] provides the reqwest adapter
//! that implements the transport port against the real service; [`config`]
//! loads the settings the adapter needs. Presentation and routing are
//! deliberately absent — observers read workflow snapshots and render them
//! however they like.

pub mod config;
pub mod domain;
pub mod outbound;
