//! Request URL construction.
//!
//! Every CryptAPI endpoint has one of two shapes:
//!
//! ```text
//! {base}/{coin path}/{action}/?{query}
//! {base}/{action}/?{query}
//! ```
//!
//! where the coin path is the coin identifier with every `_` turned into `/`
//! (`polygon_usdt` → `polygon/usdt`).

use url::Url;

use crate::error::CryptApiError;
use crate::objects::QueryParams;

/// Builds request URLs on top of an immutable base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base: Url,
}

impl UrlBuilder {
    /// Validate `base_url` and wrap it.
    ///
    /// The base must be an absolute `http` or `https` URL able to carry path
    /// segments, with no query or fragment.
    pub fn new(base_url: &str) -> Result<Self, CryptApiError> {
        let base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(CryptApiError::InvalidUrl(format!(
                "unsupported scheme `{}` in base url",
                base.scheme()
            )));
        }
        if base.cannot_be_a_base() || base.host().is_none() {
            return Err(CryptApiError::InvalidUrl(format!(
                "`{base_url}` cannot be used as a base url"
            )));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(CryptApiError::InvalidUrl(format!(
                "base url `{base_url}` must not carry a query or fragment"
            )));
        }
        Ok(Self { base })
    }

    /// Value of the `referer` header: the base URL's origin.
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }

    /// Build the URL for `action`, optionally scoped to `coin`, carrying
    /// `params` as the query string.
    ///
    /// Parameter values are percent-encoded as-is; underscores are only
    /// rewritten in the coin path.
    pub fn build(
        &self,
        coin: &str,
        action: &str,
        params: &QueryParams,
    ) -> Result<Url, CryptApiError> {
        if action.is_empty() {
            return Err(CryptApiError::InvalidUrl("empty action".to_owned()));
        }
        check_segment("action", action)?;
        check_segment("coin", coin)?;
        if !coin.is_empty() && coin.split('_').any(str::is_empty) {
            return Err(CryptApiError::InvalidUrl(format!(
                "coin `{coin}` has an empty chain or token part"
            )));
        }

        let base = self.base.as_str().trim_end_matches('/');
        let raw = if coin.is_empty() {
            format!("{base}/{action}/")
        } else {
            format!("{base}/{}/{action}/", coin_path(coin))
        };
        let mut url = Url::parse(&raw)?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.to_pairs());
        }
        Ok(url)
    }
}

/// Path form of a coin identifier (`polygon_usdt` → `polygon/usdt`).
pub fn coin_path(coin: &str) -> String {
    coin.replace('_', "/")
}

/// Reject characters that would silently change the URL structure instead
/// of landing in the path.
fn check_segment(name: &str, value: &str) -> Result<(), CryptApiError> {
    match value
        .chars()
        .find(|&c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        Some(c) => Err(CryptApiError::InvalidUrl(format!(
            "{name} `{value}` contains {c:?}"
        ))),
        None if value.split('_').any(|s| s == "." || s == "..") => Err(
            CryptApiError::InvalidUrl(format!("{name} `{value}` contains a dot segment")),
        ),
        None => Ok(()),
    }
}
