//! Shared client state and per-client options.

use super::credential::TokenCredential;
use super::pager::Pager;
use super::pipeline::{Pipeline, ReqwestTransport, Transport};
use super::policy::RetryOptions;
use super::poller::{BeginOptions, FinalStateVia, Poller};
use super::request::{expand_path, join_path, Request, API_VERSION_PARAM};
use super::response::Response;
use crate::config::{Cloud, API_VERSION};
use crate::error::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Options accepted by every client constructor. `None` means all defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub cloud: Cloud,
    /// Overrides the REST API version (`2024-05-01`).
    pub api_version: Option<String>,
    pub retry: RetryOptions,
    /// Prefixed to the `User-Agent` header.
    pub application_id: Option<String>,
    /// Replaces the default reqwest transport.
    pub transport: Option<Arc<dyn Transport>>,
}

impl ClientOptions {
    pub fn with_cloud(mut self, cloud: Cloud) -> Self {
        self.cloud = cloud;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }
}

/// Pipeline, endpoint and API version shared by the operation clients.
///
/// Cheap to clone; clones share one pipeline and token cache.
#[derive(Debug, Clone)]
pub struct ArmClient {
    pipeline: Arc<Pipeline>,
    endpoint: Url,
    api_version: String,
}

impl ArmClient {
    pub fn new(credential: Arc<dyn TokenCredential>, options: Option<ClientOptions>) -> Result<Self> {
        let options = options.unwrap_or_default();
        let endpoint = Url::parse(options.cloud.endpoint())?;
        let transport = options
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::default()));
        let pipeline = Pipeline::new(
            transport,
            options.application_id.as_deref(),
            options.retry,
            Some((credential, vec![options.cloud.scope()])),
        );
        let api_version = options
            .api_version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| API_VERSION.to_string());
        log::debug!("ARM client for {endpoint} (api-version {api_version})");
        Ok(ArmClient {
            pipeline: Arc::new(pipeline),
            endpoint,
            api_version,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn pipeline(&self) -> Arc<Pipeline> {
        Arc::clone(&self.pipeline)
    }

    /// JSON request for the path `template` expanded with `params`, with
    /// `api-version` set.
    pub(crate) fn request(
        &self,
        method: Method,
        template: &str,
        params: &[(&str, &str)],
    ) -> Result<Request> {
        let path = expand_path(template, params)?;
        let mut req = Request::new(method, join_path(&self.endpoint, &path));
        req.set_query(API_VERSION_PARAM, &self.api_version);
        req.accept_json();
        Ok(req)
    }

    /// Send and fail unless the status is one of `codes`.
    pub(crate) async fn send(&self, request: Request, codes: &[u16]) -> Result<Response> {
        self.pipeline.send(request).await?.expect_status(codes)
    }

    pub(crate) fn pager<T: DeserializeOwned>(&self, first: Result<Request>) -> Pager<T> {
        Pager::new(self.pipeline(), first)
    }

    /// Start a long-running operation, or resume one from `options`.
    pub(crate) async fn begin<T, F>(
        &self,
        options: Option<BeginOptions>,
        request: F,
        codes: &[u16],
        final_state_via: FinalStateVia,
    ) -> Result<Poller<T>>
    where
        T: DeserializeOwned + Default,
        F: FnOnce() -> Result<Request>,
    {
        if let Some(token) = options.and_then(|o| o.resume_token) {
            let poller = Poller::from_resume_token(self.pipeline(), &token)?;
            poller.ensure_operation(&request()?)?;
            return Ok(poller);
        }
        let rsp = self.send(request()?, codes).await?;
        Poller::new(self.pipeline(), rsp, final_state_via)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::credential::StaticTokenCredential;
    use chrono::{Duration, Utc};

    fn credential() -> Arc<dyn TokenCredential> {
        Arc::new(StaticTokenCredential::new("t", Utc::now() + Duration::hours(1)))
    }

    #[test]
    fn test_request_sets_api_version() {
        let client = ArmClient::new(credential(), None).unwrap();
        let req = client
            .request(Method::GET, "/subscriptions/{subscriptionId}", &[("subscriptionId", "s1")])
            .unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://management.azure.com/subscriptions/s1?api-version=2024-05-01"
        );
        assert_eq!(req.headers()[reqwest::header::ACCEPT], "application/json");
    }

    #[test]
    fn test_options_override() {
        let options = ClientOptions::default()
            .with_cloud(Cloud::AzureChina)
            .with_api_version("2023-09-01");
        let client = ArmClient::new(credential(), Some(options)).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://management.chinacloudapi.cn/");
        assert_eq!(client.api_version(), "2023-09-01");
    }

    #[test]
    fn test_invalid_endpoint() {
        let options = ClientOptions::default().with_cloud(Cloud::Custom {
            endpoint: "not a url".to_string(),
            audience: "x".to_string(),
        });
        assert!(ArmClient::new(credential(), Some(options)).is_err());
    }
}
