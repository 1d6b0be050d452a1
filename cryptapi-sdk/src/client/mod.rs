//! HTTP client for the CryptAPI endpoints.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod http;
#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod mock;
mod session;

pub use http::HttpTransport;
pub use session::{DEFAULT_QR_SIZE, PaymentSession};

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::UrlBuilder;
use crate::error::CryptApiError;
use crate::objects::{
    ApiResponse, CoinCatalog, ParamValue, QueryParams, STATUS_KEY, failure_reason, is_success,
    normalize_catalog,
};

/// Issues one `GET` per call and decodes the body into a JSON object.
///
/// Implementations must not retry or cache. [`HttpTransport`] is the
/// production implementation; tests substitute an in-memory one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<ApiResponse, CryptApiError>;
}

/// Typed facade over the CryptAPI endpoints.
///
/// Every method performs exactly one request. Responses whose `status` is
/// not `"success"` come back as the method's own [`CryptApiError`] variant.
#[derive(Debug, Clone)]
pub struct CryptApiClient<T = HttpTransport> {
    endpoints: UrlBuilder,
    transport: T,
}

impl CryptApiClient<HttpTransport> {
    /// Create a client backed by `reqwest`.
    ///
    /// The `referer` header is set to the origin of `config.base_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, CryptApiError> {
        let endpoints = UrlBuilder::new(&config.base_url)?;
        let transport = HttpTransport::new(
            endpoints.origin(),
            config.timeout_secs.map(Duration::from_secs),
        )?;
        Ok(Self {
            endpoints,
            transport,
        })
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.transport = self.transport.with_http_client(client);
        self
    }
}

impl<T: Transport> CryptApiClient<T> {
    /// Create a client on top of any [`Transport`].
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, CryptApiError> {
        Ok(Self {
            endpoints: UrlBuilder::new(&config.base_url)?,
            transport,
        })
    }

    pub fn endpoints(&self) -> &UrlBuilder {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the URL for `action` and issue it. The `status` field is not
    /// inspected.
    pub async fn request(
        &self,
        coin: &str,
        action: &str,
        params: &QueryParams,
    ) -> Result<ApiResponse, CryptApiError> {
        let url = self.endpoints.build(coin, action, params)?;
        debug!(coin, action, params = params.len(), "sending request");
        let resp = self.transport.get(url).await?;
        trace!(coin, action, success = is_success(&resp), "response decoded");
        Ok(resp)
    }

    /// `GET /info/?price=0` – every supported coin, flattened to
    /// `chain` / `chain_token` identifiers.
    pub async fn list_coins(&self) -> Result<CoinCatalog, CryptApiError> {
        let params = QueryParams::new().with("price", 0);
        let mut resp = self.request("", "info", &params).await?;

        if resp.get(STATUS_KEY).is_some_and(|s| s.is_string()) {
            if !is_success(&resp) {
                return Err(CryptApiError::MalformedCatalog(failure_reason(&resp)));
            }
            resp.remove(STATUS_KEY);
        }
        normalize_catalog(resp)
    }

    /// `GET /{coin}/info/` – details of a single coin.
    pub async fn coin_info(&self, coin: &str) -> Result<ApiResponse, CryptApiError> {
        require("coin", coin)?;
        let resp = self.request(coin, "info", &QueryParams::new()).await?;
        if !is_success(&resp) {
            return Err(CryptApiError::CoinInfoUnavailable(failure_reason(&resp)));
        }
        Ok(resp)
    }

    /// `GET /{coin}/estimate/` – blockchain fee for forwarding to
    /// `addresses` addresses at `priority`.
    pub async fn estimate_fee(
        &self,
        coin: &str,
        addresses: u32,
        priority: &str,
    ) -> Result<ApiResponse, CryptApiError> {
        require("coin", coin)?;
        let params = QueryParams::new()
            .with("address", addresses)
            .with("priority", priority);
        let resp = self.request(coin, "estimate", &params).await?;
        if !is_success(&resp) {
            return Err(CryptApiError::EstimateFailed(failure_reason(&resp)));
        }
        Ok(resp)
    }

    /// `GET /{coin}/convert/` – convert `value` expressed in `from` into
    /// `coin`.
    pub async fn convert(
        &self,
        coin: &str,
        value: impl Into<ParamValue>,
        from: &str,
    ) -> Result<ApiResponse, CryptApiError> {
        require("coin", coin)?;
        let params = QueryParams::new().with("value", value).with("from", from);
        let resp = self.request(coin, "convert", &params).await?;
        if !is_success(&resp) {
            return Err(CryptApiError::ConversionFailed(failure_reason(&resp)));
        }
        Ok(resp)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), CryptApiError> {
    if value.is_empty() {
        return Err(CryptApiError::PreconditionFailed { field });
    }
    Ok(())
}
