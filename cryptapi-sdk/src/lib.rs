#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Client SDK for the CryptAPI cryptocurrency payment gateway.
//!
//! The crate builds request URLs for the provider's fixed endpoints, issues
//! them, and turns the JSON answers into values or typed errors:
//!
//! - [`endpoint::UrlBuilder`] composes `{base}/{chain}/{token}/{action}/?…`
//!   URLs.
//! - [`objects`] holds the strictly typed query parameters, the decoded
//!   response type and the coin catalog normalizer.
//! - [`client::CryptApiClient`] (feature `client`, on by default) is the
//!   endpoint facade, with [`client::PaymentSession`] carrying the state of a
//!   single payment flow.
//!
//! The client is async and runs on `reqwest`/`tokio`. Each method awaits
//! exactly one request: nothing is spawned, cached or retried, and a
//! request deadline comes from [`ClientConfig::timeout_secs`].
//!
//! ```no_run
//! # async fn run() -> Result<(), cryptapi_sdk::CryptApiError> {
//! use cryptapi_sdk::{ClientConfig, CryptApiClient, PaymentSession, QueryParams};
//!
//! let client = CryptApiClient::new(&ClientConfig::default())?;
//! let mut session = PaymentSession::new(
//!     "polygon_usdt",
//!     "0xA6B78B56ee062185E405a1DDDD18cE8fcBC4395d",
//!     "https://shop.example.com/cryptapi/callback",
//!     QueryParams::new().with("order_id", 12345),
//!     QueryParams::new().with("pending", true),
//! );
//! let address = client.generate_address(&mut session).await?;
//! let qr = client.generate_qr(&session, None, None).await?;
//! # let _ = (address, qr);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod objects;

#[cfg(feature = "client")]
pub use client::{CryptApiClient, HttpTransport, PaymentSession, Transport};
pub use config::ClientConfig;
pub use endpoint::UrlBuilder;
pub use error::CryptApiError;
pub use objects::{ApiResponse, CoinCatalog, ParamValue, QueryParams};
