//! Payment sessions: address generation, payment logs and QR codes.

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{CryptApiClient, Transport, require};
use crate::error::CryptApiError;
use crate::objects::{ApiResponse, ParamValue, QueryParams, failure_reason, is_success};

/// QR code edge length in pixels used when the caller does not pick one.
pub const DEFAULT_QR_SIZE: u32 = 512;

/// Caller-held state for one payment flow.
///
/// A session starts without a payment address;
/// [`CryptApiClient::generate_address`] fills it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    /// Coin identifier, e.g. `btc` or `polygon_usdt`.
    pub coin: String,
    /// Merchant wallet the provider forwards payments to.
    pub own_address: String,
    /// URL the provider notifies on payment events.
    pub callback_url: String,
    /// Appended to the callback URL and sent back by the provider on every
    /// notification (order ids and the like).
    pub params: QueryParams,
    /// Provider options sent with the address request (`pending`,
    /// `confirmations`, `multi_token`, …).
    pub provider_params: QueryParams,
    payment_address: Option<String>,
}

impl PaymentSession {
    pub fn new(
        coin: impl Into<String>,
        own_address: impl Into<String>,
        callback_url: impl Into<String>,
        params: QueryParams,
        provider_params: QueryParams,
    ) -> Self {
        Self {
            coin: coin.into(),
            own_address: own_address.into(),
            callback_url: callback_url.into(),
            params,
            provider_params,
            payment_address: None,
        }
    }

    /// Restore a payment address generated earlier.
    pub fn with_payment_address(mut self, address: impl Into<String>) -> Self {
        self.payment_address = Some(address.into());
        self
    }

    /// The address the customer pays to, once generated.
    pub fn payment_address(&self) -> Option<&str> {
        self.payment_address.as_deref()
    }

    /// Callback URL carrying the forwarded parameters, percent-escaped for
    /// use as the `callback` query value.
    fn escaped_callback(&self) -> Result<String, CryptApiError> {
        let mut callback = Url::parse(&self.callback_url)
            .map_err(|e| CryptApiError::InvalidUrl(format!("callback url: {e}")))?;
        if !self.params.is_empty() {
            callback.query_pairs_mut().extend_pairs(self.params.to_pairs());
        }
        Ok(urlencoding::encode(callback.as_str()).into_owned())
    }
}

impl<T: Transport> CryptApiClient<T> {
    /// `GET /{coin}/create/` – generate the address the customer pays to.
    ///
    /// On success the address is stored on `session` and returned. On any
    /// failure the session is left untouched.
    pub async fn generate_address(
        &self,
        session: &mut PaymentSession,
    ) -> Result<String, CryptApiError> {
        require("coin", &session.coin)?;
        require("callback_url", &session.callback_url)?;
        require("own_address", &session.own_address)?;

        let mut params = session.provider_params.clone();
        params.insert("callback", session.escaped_callback()?);
        params.insert("address", session.own_address.as_str());

        let resp = self.request(&session.coin, "create", &params).await?;
        if !is_success(&resp) {
            return Err(CryptApiError::AddressGenerationFailed(failure_reason(&resp)));
        }
        let Some(Value::String(address)) = resp.get("address_in") else {
            return Err(CryptApiError::AddressGenerationFailed(
                "response has no `address_in`".to_owned(),
            ));
        };

        debug!(coin = %session.coin, "payment address generated");
        session.payment_address = Some(address.clone());
        Ok(address.clone())
    }

    /// `GET /{coin}/logs/` – payments and callbacks recorded for the
    /// session's callback URL.
    pub async fn check_logs(&self, session: &PaymentSession) -> Result<ApiResponse, CryptApiError> {
        require("coin", &session.coin)?;
        require("callback_url", &session.callback_url)?;

        let params = QueryParams::new().with("callback", session.escaped_callback()?);
        let resp = self.request(&session.coin, "logs", &params).await?;
        if !is_success(&resp) {
            return Err(CryptApiError::LogsUnavailable(failure_reason(&resp)));
        }
        Ok(resp)
    }

    /// `GET /{coin}/qrcode/` – QR code for the session's payment address.
    ///
    /// `value` embeds an amount in the payment URI. A `size` of `None` or
    /// `Some(0)` uses [`DEFAULT_QR_SIZE`].
    pub async fn generate_qr(
        &self,
        session: &PaymentSession,
        value: Option<ParamValue>,
        size: Option<u32>,
    ) -> Result<ApiResponse, CryptApiError> {
        require("coin", &session.coin)?;
        let address = match session.payment_address() {
            Some(address) if !address.is_empty() => address,
            _ => return Err(CryptApiError::NoPaymentAddress),
        };

        let size = size.filter(|&s| s != 0).unwrap_or(DEFAULT_QR_SIZE);
        let mut params = QueryParams::new().with("address", address).with("size", size);
        if let Some(value) = value {
            params.insert("value", value);
        }

        let resp = self.request(&session.coin, "qrcode", &params).await?;
        if !is_success(&resp) {
            return Err(CryptApiError::QrGenerationFailed(failure_reason(&resp)));
        }
        Ok(resp)
    }
}
