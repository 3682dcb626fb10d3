//! HTTP transport adapter for the coupon service.
//!
//! This module provides the reqwest implementation of the `CouponApi`
//! port.

mod api_client;

pub use api_client::{ApiClientError, HttpCouponApi};
