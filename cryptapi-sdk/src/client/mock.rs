//! In-memory [`Transport`] recording every URL it is asked for.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::Transport;
use crate::error::CryptApiError;
use crate::objects::ApiResponse;

#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, CryptApiError>>>,
    urls: Mutex<Vec<Url>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON object as the next reply.
    pub(crate) fn respond(self, body: Value) -> Self {
        let Value::Object(body) = body else {
            panic!("mock replies must be JSON objects");
        };
        self.replies.lock().unwrap().push_back(Ok(body));
        self
    }

    /// Queue a transport failure as the next reply.
    pub(crate) fn fail_with(self, err: CryptApiError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn urls(&self) -> Vec<Url> {
        self.urls.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: Url) -> Result<ApiResponse, CryptApiError> {
        self.urls.lock().unwrap().push(url.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {url}"))
    }
}
