//! Reqwest-backed coupon service transport.
//!
//! This adapter owns transport details only: URL joining, the credential
//! cookie store, JSON encoding/decoding, and network error mapping. It
//! never retries and never interprets status codes — that is the
//! classifier's job.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

use crate::domain::ports::{
    ApiMethod, ApiOutcome, ApiRequest, ApiResponse, CouponApi, ResponseBody, TransportError,
};

const DEFAULT_USER_AGENT: &str = "coupon-client/0.1";

/// Errors raised while constructing the adapter.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The underlying reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Transport adapter holding the ambient credential cookie store.
///
/// One instance serves every workflow in a session, so the cookie set by
/// a successful login rides along on subsequent admin requests.
pub struct HttpCouponApi {
    client: Client,
    base_url: Url,
}

impl HttpCouponApi {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|error| TransportError::network(format!("invalid endpoint {path}: {error}")))
    }
}

#[async_trait]
impl CouponApi for HttpCouponApi {
    async fn send(&self, request: ApiRequest) -> ApiOutcome {
        let url = self.endpoint(request.path())?;
        let mut builder = match request.method() {
            ApiMethod::Get => self.client.get(url),
            ApiMethod::Post => self.client.post(url),
            ApiMethod::Patch => self.client.patch(url),
        };
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok(ApiResponse::new(status, ResponseBody::from_bytes(&bytes)))
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network adapter helpers.
    use super::*;
    use rstest::rstest;

    fn adapter(base: &str) -> HttpCouponApi {
        let base_url = Url::parse(base).expect("valid base URL");
        HttpCouponApi::new(base_url, Duration::from_secs(5)).expect("adapter should build")
    }

    #[rstest]
    #[case("http://localhost:5000", "/api/coupons/claim", "http://localhost:5000/api/coupons/claim")]
    #[case("http://localhost:5000/", "/api/admin/coupons", "http://localhost:5000/api/admin/coupons")]
    #[case("https://coupons.example", "/api/admin/login", "https://coupons.example/api/admin/login")]
    fn joins_endpoint_paths_onto_the_base_url(
        #[case] base: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let url = adapter(base).endpoint(path).expect("join should succeed");
        assert_eq!(url.as_str(), expected);
    }
}
