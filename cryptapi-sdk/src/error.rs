//! Error taxonomy shared by every part of the SDK.

/// Errors produced by the CryptAPI SDK.
///
/// Every failure is returned to the immediate caller. Nothing is retried and
/// nothing is swallowed; a response whose `status` is not `"success"` is
/// always turned into the error variant of the operation that issued it.
#[derive(Debug, thiserror::Error)]
pub enum CryptApiError {
    /// The base URL, coin path or action could not be composed into a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (DNS, TLS, connection refused, timeout, …).
    #[cfg(feature = "client")]
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not a JSON object.
    #[error("decode error: {0}")]
    Decode(String),

    /// The coin catalog did not have the expected shape.
    #[error("malformed coin catalog: {0}")]
    MalformedCatalog(String),

    /// A required session field was empty.
    #[error("precondition failed: `{field}` must not be empty")]
    PreconditionFailed { field: &'static str },

    /// A loosely typed value could not be used as a query parameter.
    #[error("invalid parameter type for `{key}`: {kind} is not a string, integer or boolean")]
    InvalidParameterType { key: String, kind: &'static str },

    #[error("failed to generate payment address: {0}")]
    AddressGenerationFailed(String),

    #[error("payment logs unavailable: {0}")]
    LogsUnavailable(String),

    #[error("failed to generate qr code: {0}")]
    QrGenerationFailed(String),

    /// A QR code was requested before any payment address was generated.
    #[error("no payment address has been generated for this session")]
    NoPaymentAddress,

    #[error("fee estimate failed: {0}")]
    EstimateFailed(String),

    #[error("conversion failed: {0}")]
    ConversionFailed(String),

    #[error("coin info unavailable: {0}")]
    CoinInfoUnavailable(String),
}

impl From<url::ParseError> for CryptApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for CryptApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
