//! `reqwest`-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::REFERER;
use tracing::trace;
use url::Url;

use super::Transport;
use crate::error::CryptApiError;
use crate::objects::{ApiResponse, decode_body};

/// Issues plain `GET` requests with a fixed `referer` header.
///
/// The body is decoded whatever the HTTP status is: the provider reports
/// failures as JSON objects with `"status": "error"`, which the facade turns
/// into operation errors.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    referer: String,
}

impl HttpTransport {
    /// Create a transport sending `referer` on every request.
    ///
    /// `timeout` bounds each request end to end; `None` keeps the `reqwest`
    /// default of no deadline.
    pub fn new(referer: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CryptApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            referer: referer.into(),
        })
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure a proxy or a different deadline).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn referer(&self) -> &str {
        &self.referer
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<ApiResponse, CryptApiError> {
        let resp = self
            .http
            .get(url)
            .header(REFERER, self.referer.as_str())
            .send()
            .await?;

        parse_response(resp).await
    }
}

async fn parse_response(resp: reqwest::Response) -> Result<ApiResponse, CryptApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    trace!(%status, len = bytes.len(), "response received");
    decode_body(&bytes).map_err(|err| match err {
        CryptApiError::Decode(msg) if !status.is_success() => {
            CryptApiError::Decode(format!("{msg} (http status {status})"))
        }
        err => err,
    })
}
