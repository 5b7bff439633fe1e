//! Common test utilities for Grist client integration tests.
//!
//! Provides a scripted [`MockTransport`] that records every request it sees and
//! replays queued responses, plus small helpers for building clients and
//! field maps.

#![allow(dead_code)]

use gristctl::records::Fields;
use gristctl::transport::{HttpMethod, RawResponse, Transport};
use gristctl::{GristClient, GristError, GristResult, RequestContext};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://grist.example.com";

/// A request as seen by the mock transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    /// Body decoded as JSON; panics on invalid JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }

    /// Path without its query string.
    pub fn route(&self) -> &str {
        self.path.split('?').next().unwrap_or_default()
    }

    /// Query pairs of the path, in emitted order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self.path.split_once('?') {
            Some((_, query)) => query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Response(RawResponse),
    Failure(String),
}

/// Scripted transport: queued replies are served in order, then the default.
#[derive(Debug, Clone)]
pub struct MockTransport {
    base_url: String,
    replies: Arc<Mutex<VecDeque<Reply>>>,
    default_reply: Option<Reply>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Queue a response for the next unanswered request.
    pub fn with_response(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(RawResponse::new(status, body)));
        self
    }

    /// Queue a network-level failure for the next unanswered request.
    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Failure(message.to_string()));
        self
    }

    /// Answer every request beyond the queue with this response.
    pub fn with_default_response(mut self, status: u16, body: &str) -> Self {
        self.default_reply = Some(Reply::Response(RawResponse::new(status, body)));
        self
    }

    /// Wait this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one request should have been sent")
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: HttpMethod, path: &str, body: String) -> GristResult<RawResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.replies.lock().unwrap().pop_front();
        match queued.or_else(|| self.default_reply.clone()) {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(GristError::transport(message)),
            None => Ok(RawResponse::new(500, "no scripted response")),
        }
    }
}

/// Client over a fresh mock transport.
pub fn client(transport: MockTransport) -> GristClient<MockTransport> {
    GristClient::new(transport)
}

pub fn context() -> RequestContext {
    RequestContext::new("test-request")
}

/// Field map from a JSON object literal.
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Initialize logging once per test binary; repeated calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
