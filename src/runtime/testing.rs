//! In-process transport for unit tests.

use super::pipeline::{Pipeline, Transport};
use super::policy::{RetryOptions, RETRYABLE_STATUS_CODES};
use super::request::Request;
use super::response::Response;
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Canned = (u16, Vec<(String, String)>, String);

/// Answers requests from a queue of canned responses and records them.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(MockTransport::default())
    }

    pub(crate) fn push(&self, status: u16, headers: &[(&str, &str)], body: &str) {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.responses
            .lock()
            .unwrap()
            .push_back((status, headers, body.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        let (status, headers, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no response queued for {}", request.url()));
        let mut map = HeaderMap::new();
        for (k, v) in headers {
            map.insert(
                HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(&v).unwrap(),
            );
        }
        Ok(Response::new(
            StatusCode::from_u16(status).unwrap(),
            map,
            Bytes::from(body),
            request.method().clone(),
            request.url().clone(),
        ))
    }
}

/// Pipeline over `transport` without credentials and with millisecond retries.
pub(crate) fn test_pipeline(transport: Arc<MockTransport>) -> Arc<Pipeline> {
    let retry = RetryOptions {
        max_retries: 3,
        retry_delay: Duration::from_millis(1),
        max_retry_delay: Some(Duration::from_millis(5)),
        status_codes: RETRYABLE_STATUS_CODES.to_vec(),
    };
    Arc::new(Pipeline::new(transport, None, retry, None))
}
