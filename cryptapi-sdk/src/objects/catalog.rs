//! Coin catalog normalization.
//!
//! The `info` endpoint answers with base coins at the top level and tokens
//! nested one level under their chain:
//!
//! ```text
//! { "btc": { "ticker": "btc", ... },
//!   "polygon": { "usdt": { "ticker": "usdt", ... }, ... },
//!   "fee_tiers": [ ... ] }
//! ```
//!
//! [`normalize_catalog`] flattens this into `btc`, `polygon_usdt`, … so each
//! key is directly usable as a coin identifier.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{ApiResponse, json_kind};
use crate::error::CryptApiError;

/// Metadata of a single coin or token, as sent by the provider.
pub type CoinMetadata = serde_json::Map<String, Value>;

/// Flattened coin identifier → metadata.
pub type CoinCatalog = BTreeMap<String, CoinMetadata>;

const FEE_TIERS_KEY: &str = "fee_tiers";
const TICKER_KEY: &str = "ticker";

/// Flatten a raw `info` response into a [`CoinCatalog`].
///
/// Entries holding a `ticker` are base coins and are kept under their own
/// key. Every other entry is a chain whose tokens are emitted as
/// `<chain>_<token>`.
pub fn normalize_catalog(mut raw: ApiResponse) -> Result<CoinCatalog, CryptApiError> {
    raw.remove(FEE_TIERS_KEY);

    let mut coins = CoinCatalog::new();
    for (chain, data) in raw {
        let Value::Object(data) = data else {
            return Err(CryptApiError::MalformedCatalog(format!(
                "entry `{chain}` is {}, expected an object",
                json_kind(&data)
            )));
        };

        if data.contains_key(TICKER_KEY) {
            coins.insert(chain, data);
            continue;
        }

        for (token, token_data) in data {
            let Value::Object(token_data) = token_data else {
                return Err(CryptApiError::MalformedCatalog(format!(
                    "token `{chain}.{token}` is {}, expected an object",
                    json_kind(&token_data)
                )));
            };
            coins.insert(format!("{chain}_{token}"), token_data);
        }
    }
    Ok(coins)
}
