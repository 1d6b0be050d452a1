//! Client configuration.
//!
//! The configuration is an immutable value handed to the client at
//! construction. The library never reads environment variables or files on
//! its own; callers that keep settings in a file can embed [`ClientConfig`]
//! in their own `serde` structures.

use serde::{Deserialize, Serialize};

/// Production endpoint of the CryptAPI service.
pub const DEFAULT_BASE_URL: &str = "https://api.cryptapi.io";

/// Settings for a [`CryptApiClient`](crate::client::CryptApiClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL every request path is built on.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request deadline in seconds. `None` leaves the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with no request deadline.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Set the request deadline.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}
