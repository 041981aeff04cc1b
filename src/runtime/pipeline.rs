//! Request pipeline: headers, authorization, retries and the transport.

use super::credential::TokenCredential;
use super::policy::{BearerTokenPolicy, RetryOptions};
use super::request::Request;
use super::response::Response;
use crate::config::{MODULE_NAME, MODULE_VERSION};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};
use std::fmt;
use std::sync::Arc;

/// Header carrying the per-request correlation id.
pub const HEADER_CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";

/// Sends a single request over the wire.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn send(&self, request: &Request) -> Result<Response>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }
        let rsp = builder.send().await?;
        let status = rsp.status();
        let headers = rsp.headers().clone();
        let body = rsp.bytes().await?;
        Ok(Response::new(
            status,
            headers,
            body,
            request.method().clone(),
            request.url().clone(),
        ))
    }
}

/// Builds the `User-Agent` value: `[<application_id> ]azsdk-rust-<module>/<version>`.
pub fn user_agent(application_id: Option<&str>) -> String {
    let sdk = format!("azsdk-rust-{MODULE_NAME}/{MODULE_VERSION}");
    match application_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("{id} {sdk}"),
        None => sdk,
    }
}

/// Every client operation goes through one shared pipeline.
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    user_agent: String,
    retry: RetryOptions,
    bearer: Option<BearerTokenPolicy>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("transport", &self.transport)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .field("bearer", &self.bearer)
            .finish()
    }
}

impl Pipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        application_id: Option<&str>,
        retry: RetryOptions,
        credential: Option<(Arc<dyn TokenCredential>, Vec<String>)>,
    ) -> Self {
        Pipeline {
            transport,
            user_agent: user_agent(application_id),
            retry,
            bearer: credential.map(|(cred, scopes)| BearerTokenPolicy::new(cred, scopes)),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Any status code comes back as `Ok`; checking it is up to the caller.
    pub async fn send(&self, mut request: Request) -> Result<Response> {
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            request.insert_header_value(USER_AGENT, ua);
        }
        let request_id = HeaderName::from_static(HEADER_CLIENT_REQUEST_ID);
        if !request.headers().contains_key(&request_id) {
            request.insert_header(request_id, &uuid::Uuid::new_v4().to_string())?;
        }

        let mut attempt = 0u32;
        loop {
            if let Some(bearer) = &self.bearer {
                bearer.authorize(&mut request).await?;
            }
            log::debug!(
                "{} {} (attempt {})",
                request.method(),
                request.url(),
                attempt + 1
            );
            let result = self.transport.send(&request).await;
            let retryable = match &result {
                Ok(rsp) => self.retry.is_retryable(rsp.status().as_u16()),
                Err(err) => matches!(err, crate::Error::Transport(_)),
            };
            if !retryable || attempt >= self.retry.max_retries {
                if let Ok(rsp) = &result {
                    log::debug!("{} {} -> {}", request.method(), request.url(), rsp.status());
                }
                return result;
            }

            attempt += 1;
            let delay = match self
                .retry
                .delay(attempt, result.as_ref().ok().map(Response::headers))
            {
                Some(delay) => delay,
                None => {
                    log::warn!(
                        "{} {} asked to retry later than {:?}, giving up",
                        request.method(),
                        request.url(),
                        self.retry.max_retry_delay
                    );
                    return result;
                }
            };
            match &result {
                Ok(rsp) => log::warn!(
                    "{} {} returned {}, retry {attempt}/{} in {delay:?}",
                    request.method(),
                    request.url(),
                    rsp.status(),
                    self.retry.max_retries
                ),
                Err(err) => log::warn!(
                    "{} {} failed: {err}, retry {attempt}/{} in {delay:?}",
                    request.method(),
                    request.url(),
                    self.retry.max_retries
                ),
            }
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{test_pipeline, MockTransport};
    use reqwest::{Method, StatusCode};
    use url::Url;

    fn get() -> Request {
        Request::new(Method::GET, Url::parse("https://management.azure.com/x").unwrap())
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(
            user_agent(None),
            format!("azsdk-rust-armnetwork/{}", env!("CARGO_PKG_VERSION"))
        );
        assert!(user_agent(Some("my-app")).starts_with("my-app azsdk-rust-armnetwork/"));
        assert!(user_agent(Some("  ")).starts_with("azsdk-rust-"));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let transport = MockTransport::new();
        transport.push(503, &[], "");
        transport.push(429, &[("retry-after-ms", "1")], "");
        transport.push(200, &[], "{}");
        let pipeline = test_pipeline(transport.clone());
        let rsp = pipeline.send(get()).await.unwrap();
        assert_eq!(rsp.status(), StatusCode::OK);

        let seen = transport.requests();
        assert_eq!(seen.len(), 3);
        let id = seen[0].headers()[HEADER_CLIENT_REQUEST_ID].clone();
        assert_eq!(id.to_str().unwrap().len(), 36);
        assert!(seen.iter().all(|r| r.headers()[HEADER_CLIENT_REQUEST_ID] == id));
        assert!(seen[0].headers()[USER_AGENT]
            .to_str()
            .unwrap()
            .starts_with("azsdk-rust-armnetwork/"));
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let transport = MockTransport::new();
        for _ in 0..4 {
            transport.push(500, &[], "");
        }
        let pipeline = test_pipeline(transport.clone());
        let rsp = pipeline.send(get()).await.unwrap();
        assert_eq!(rsp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_no_retry_on_client_error() {
        let transport = MockTransport::new();
        transport.push(404, &[], "");
        let pipeline = test_pipeline(transport.clone());
        let rsp = pipeline.send(get()).await.unwrap();
        assert_eq!(rsp.status(), StatusCode::NOT_FOUND);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_no_retry_when_throttled_beyond_cap() {
        let transport = MockTransport::new();
        transport.push(429, &[("retry-after", "300")], "");
        transport.push(200, &[], "{}");
        let pipeline = test_pipeline(transport.clone());
        let rsp = pipeline.send(get()).await.unwrap();
        assert_eq!(rsp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_keeps_caller_request_id() {
        let transport = MockTransport::new();
        transport.push(200, &[], "");
        let mut req = get();
        req.insert_header(HeaderName::from_static(HEADER_CLIENT_REQUEST_ID), "my-id")
            .unwrap();
        test_pipeline(transport.clone()).send(req).await.unwrap();
        assert_eq!(transport.requests()[0].headers()[HEADER_CLIENT_REQUEST_ID], "my-id");
    }
}
