//! Strictly typed query parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CryptApiError;

/// A single query parameter value.
///
/// Conversion to the wire is total: strings are sent verbatim, integers in
/// decimal and booleans as `1` / `0`, the provider's flag convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// Convert a loosely typed JSON value, naming `key` in the error.
    pub fn from_json(key: &str, value: Value) -> Result<Self, CryptApiError> {
        let kind = match value {
            Value::String(s) => return Ok(Self::Str(s)),
            Value::Bool(b) => return Ok(Self::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => return Ok(Self::Int(i)),
                None if n.is_f64() => "non-integral number",
                None => "out-of-range integer",
            },
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Err(CryptApiError::InvalidParameterType {
            key: key.to_owned(),
            kind,
        })
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(true) => f.write_str("1"),
            Self::Bool(false) => f.write_str("0"),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// String-keyed query parameters. Inserting an existing key replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every entry of `other` into `self`, overwriting shared keys.
    pub fn merge(&mut self, other: &QueryParams) {
        self.0
            .extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Wire form of every entry, in key order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Convert a loosely typed JSON object.
    ///
    /// Fails with [`CryptApiError::InvalidParameterType`] on the first value
    /// that is not a string, integer or boolean.
    pub fn from_json(map: serde_json::Map<String, Value>) -> Result<Self, CryptApiError> {
        let mut params = Self::new();
        for (key, value) in map {
            let value = ParamValue::from_json(&key, value)?;
            params.0.insert(key, value);
        }
        Ok(params)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
