//! Long-running operation poller.

use super::pipeline::Pipeline;
use super::policy::retry_after;
use super::request::Request;
use super::response::Response;
use crate::config::DEFAULT_POLL_FREQUENCY;
use crate::error::{Error, ResponseError, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const HEADER_AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";
const HEADER_OPERATION_LOCATION: &str = "operation-location";
const HEADER_LOCATION: &str = "location";

const STATUS_IN_PROGRESS: &str = "InProgress";
const STATUS_SUCCEEDED: &str = "Succeeded";
const STATUS_FAILED: &str = "Failed";

/// Where the final resource is read from once the operation succeeds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FinalStateVia {
    #[default]
    AzureAsyncOperation,
    Location,
    OriginalUri,
    OperationLocation,
}

/// Options shared by every `begin_*` operation.
#[derive(Debug, Clone, Default)]
pub struct BeginOptions {
    /// Continue an operation started elsewhere instead of sending the
    /// initial request. Obtained from [`Poller::resume_token`].
    pub resume_token: Option<String>,
}

impl BeginOptions {
    pub fn resume(token: impl Into<String>) -> Self {
        BeginOptions {
            resume_token: Some(token.into()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
enum PollingMethod {
    /// Status monitor from `Azure-AsyncOperation` or `Operation-Location`.
    StatusMonitor,
    /// `Location` polled until it stops answering 202.
    Location,
    /// The resource itself polled for its provisioning state.
    Body,
    /// Terminal from the initial response.
    Done,
}

/// Serializable poller state; this is what a resume token carries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct PollerState {
    polling: PollingMethod,
    method: String,
    original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    polling_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_url: Option<String>,
    /// The status monitor came from `Operation-Location`.
    #[serde(default)]
    operation_location: bool,
    final_state_via: FinalStateVia,
    status: String,
    /// Result type of the operation; a token only resumes the same kind of poller.
    result_type: String,
}

fn is_terminal(status: &str) -> bool {
    is_succeeded(status) || is_failed(status) || is_canceled(status)
}

fn is_succeeded(status: &str) -> bool {
    status.eq_ignore_ascii_case(STATUS_SUCCEEDED)
}

fn is_failed(status: &str) -> bool {
    status.eq_ignore_ascii_case(STATUS_FAILED)
}

fn is_canceled(status: &str) -> bool {
    status.eq_ignore_ascii_case("Canceled") || status.eq_ignore_ascii_case("Cancelled")
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    status: Option<String>,
    resource_location: Option<String>,
    properties: Option<ProvisioningBody>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProvisioningBody {
    provisioning_state: Option<String>,
}

fn status_body(rsp: &Response) -> StatusBody {
    serde_json::from_slice(rsp.body()).unwrap_or_default()
}

fn provisioning_state(rsp: &Response) -> Option<String> {
    status_body(rsp).properties.and_then(|p| p.provisioning_state)
}

/// Decode a final body. An empty body, or a result type that carries no
/// data such as `()`, yields `T::default()`.
fn decode<T: DeserializeOwned + Default>(rsp: &Response) -> Result<T> {
    if std::mem::size_of::<T>() == 0 || rsp.body().iter().all(u8::is_ascii_whitespace) {
        Ok(T::default())
    } else {
        rsp.json()
    }
}

/// Tracks a long-running operation until it reaches a terminal state.
pub struct Poller<T> {
    pipeline: Arc<Pipeline>,
    state: PollerState,
    last: Option<Response>,
    retry_after: Option<Duration>,
    _result: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned + Default> Poller<T> {
    /// Build a poller from the initial response of a `begin_*` operation.
    pub(crate) fn new(
        pipeline: Arc<Pipeline>,
        response: Response,
        final_state_via: FinalStateVia,
    ) -> Result<Self> {
        let method = response.method().clone();
        let async_op = response
            .header(HEADER_AZURE_ASYNC_OPERATION)
            .map(|u| (u.to_string(), false))
            .or_else(|| {
                response
                    .header(HEADER_OPERATION_LOCATION)
                    .map(|u| (u.to_string(), true))
            });
        let location_url = response.header(HEADER_LOCATION).map(str::to_string);
        let is_put_or_patch = method == Method::PUT || method == Method::PATCH;

        let mut operation_location = false;
        let (polling, polling_url, status) = if let Some((url, from_op_location)) = async_op {
            Url::parse(&url)?;
            operation_location = from_op_location;
            let status = provisioning_state(&response)
                .filter(|s| is_terminal(s))
                .unwrap_or_else(|| STATUS_IN_PROGRESS.to_string());
            (PollingMethod::StatusMonitor, Some(url), status)
        } else if response.status() == StatusCode::ACCEPTED {
            let url = location_url.as_deref().ok_or_else(|| {
                Error::Poller("the operation returned 202 without a polling URL".to_string())
            })?;
            Url::parse(url)?;
            (PollingMethod::Location, None, STATUS_IN_PROGRESS.to_string())
        } else {
            match provisioning_state(&response) {
                Some(state) if is_put_or_patch => (PollingMethod::Body, None, state),
                _ => (PollingMethod::Done, None, STATUS_SUCCEEDED.to_string()),
            }
        };

        log::debug!("{method} {} started as {polling:?} ({status})", response.url());
        Ok(Self::from_parts(
            pipeline,
            PollerState {
                polling,
                method: method.to_string(),
                original_url: response.url().to_string(),
                polling_url,
                location_url,
                operation_location,
                final_state_via,
                status,
                result_type: std::any::type_name::<T>().to_string(),
            },
            response,
        ))
    }

    fn from_parts(pipeline: Arc<Pipeline>, state: PollerState, response: Response) -> Self {
        let retry_after = retry_after(response.headers());
        Poller {
            pipeline,
            state,
            last: Some(response),
            retry_after,
            _result: PhantomData,
        }
    }

    /// Rebuild a poller from [`Poller::resume_token`] output.
    pub fn from_resume_token(pipeline: Arc<Pipeline>, token: &str) -> Result<Self> {
        let state: PollerState =
            serde_json::from_str(token).map_err(|e| Error::ResumeToken(e.to_string()))?;
        if is_terminal(&state.status) {
            return Err(Error::ResumeToken(
                "the token describes a completed operation".to_string(),
            ));
        }
        if state.result_type != std::any::type_name::<T>() {
            return Err(Error::ResumeToken(format!(
                "the token belongs to an operation returning {}",
                state.result_type
            )));
        }
        Method::from_bytes(state.method.as_bytes())
            .map_err(|e| Error::ResumeToken(e.to_string()))?;
        Ok(Poller {
            pipeline,
            state,
            last: None,
            retry_after: None,
            _result: PhantomData,
        })
    }

    /// Fails unless `request` targets the operation this poller tracks.
    pub(crate) fn ensure_operation(&self, request: &Request) -> Result<()> {
        let original = Url::parse(&self.state.original_url)?;
        if *request.method() != self.method() || request.url().path() != original.path() {
            return Err(Error::ResumeToken(format!(
                "the token belongs to {} {}, not {} {}",
                self.state.method,
                original.path(),
                request.method(),
                request.url().path()
            )));
        }
        Ok(())
    }

    /// Opaque token that lets another process continue this operation.
    pub fn resume_token(&self) -> Result<String> {
        if self.done() {
            return Err(Error::ResumeToken(
                "cannot create a resume token for a completed operation".to_string(),
            ));
        }
        serde_json::to_string(&self.state).map_err(Error::Serialize)
    }

    /// True once the operation reached `Succeeded`, `Failed` or `Canceled`.
    pub fn done(&self) -> bool {
        is_terminal(&self.state.status)
    }

    /// Current status as reported by the service.
    pub fn status(&self) -> &str {
        &self.state.status
    }

    fn method(&self) -> Method {
        Method::from_bytes(self.state.method.as_bytes()).unwrap_or(Method::GET)
    }

    fn get_request(url: &str) -> Result<Request> {
        let mut req = Request::new(Method::GET, Url::parse(url)?);
        req.accept_json();
        Ok(req)
    }

    /// Issue one status request. A no-op once the operation is done.
    pub async fn poll(&mut self) -> Result<()> {
        if self.done() {
            return Ok(());
        }
        let url = match self.state.polling {
            PollingMethod::StatusMonitor => self.state.polling_url.clone(),
            PollingMethod::Location => self.state.location_url.clone(),
            PollingMethod::Body => Some(self.state.original_url.clone()),
            PollingMethod::Done => None,
        }
        .ok_or_else(|| Error::Poller("no polling URL".to_string()))?;

        let rsp = self.pipeline.send(Self::get_request(&url)?).await?;
        let code = rsp.status().as_u16();
        let status = match self.state.polling {
            PollingMethod::StatusMonitor => {
                let rsp = rsp.expect_status(&[200, 201, 202, 204])?;
                let status = status_body(&rsp).status.ok_or_else(|| {
                    Error::Poller("the status monitor response did not contain a status".to_string())
                })?;
                self.last = Some(rsp);
                status
            }
            PollingMethod::Location => {
                if let Some(location) = rsp.header(HEADER_LOCATION) {
                    self.state.location_url = Some(location.to_string());
                }
                let status = match code {
                    202 => STATUS_IN_PROGRESS.to_string(),
                    200..=299 => provisioning_state(&rsp)
                        .unwrap_or_else(|| STATUS_SUCCEEDED.to_string()),
                    _ => STATUS_FAILED.to_string(),
                };
                self.last = Some(rsp);
                status
            }
            PollingMethod::Body => {
                let status = match code {
                    204 => STATUS_SUCCEEDED.to_string(),
                    200 | 201 => provisioning_state(&rsp)
                        .unwrap_or_else(|| STATUS_SUCCEEDED.to_string()),
                    _ => return Err(rsp.into_error()),
                };
                self.last = Some(rsp);
                status
            }
            PollingMethod::Done => STATUS_SUCCEEDED.to_string(),
        };
        self.retry_after = self.last.as_ref().and_then(|r| retry_after(r.headers()));
        log::debug!("poll {url} -> {code} {status}");
        self.state.status = status;
        Ok(())
    }

    /// The outcome of a completed operation.
    ///
    /// Fetches the final resource when the polling method requires it.
    pub async fn result(&mut self) -> Result<T> {
        if !self.done() {
            return Err(Error::Poller("the operation has not completed".to_string()));
        }
        let last = self
            .last
            .as_ref()
            .ok_or_else(|| Error::Poller("no response recorded".to_string()))?;
        if !is_succeeded(&self.state.status) {
            return Err(self.failure(last));
        }

        let method = self.method();
        if method == Method::DELETE {
            return Ok(T::default());
        }
        let final_url = match self.state.polling {
            PollingMethod::StatusMonitor => self.final_url(&method, last),
            _ => None,
        };
        match final_url {
            Some(url) => {
                let rsp = self
                    .pipeline
                    .send(Self::get_request(&url)?)
                    .await?
                    .expect_status(&[200, 201, 204])?;
                decode(&rsp)
            }
            None => decode(last),
        }
    }

    fn final_url(&self, method: &Method, last: &Response) -> Option<String> {
        if let Some(url) = status_body(last).resource_location {
            return Some(url);
        }
        let via_location = self.state.final_state_via == FinalStateVia::Location;
        match *method {
            Method::PUT | Method::PATCH => match &self.state.location_url {
                Some(location) if via_location => Some(location.clone()),
                _ => Some(self.state.original_url.clone()),
            },
            Method::POST => match &self.state.location_url {
                Some(location) if via_location || self.state.operation_location => {
                    Some(location.clone())
                }
                _ if self.state.final_state_via == FinalStateVia::OriginalUri => {
                    Some(self.state.original_url.clone())
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn failure(&self, last: &Response) -> Error {
        log::warn!("operation on {} ended as {}", self.state.original_url, self.state.status);
        ResponseError::new(
            last.method().clone(),
            last.url().clone(),
            last.status(),
            last.headers(),
            last.body(),
        )
        .into()
    }

    /// Poll until the operation completes, then return [`Poller::result`].
    ///
    /// Waits `frequency` (30s when `None`) between polls unless the service
    /// asks for a different delay with `Retry-After`.
    pub async fn poll_until_done(&mut self, frequency: Option<Duration>) -> Result<T> {
        let frequency = frequency.unwrap_or(DEFAULT_POLL_FREQUENCY);
        loop {
            if self.done() {
                break;
            }
            self.poll().await?;
            if self.done() {
                break;
            }
            let delay = self.retry_after.unwrap_or(frequency);
            log::trace!("operation {} still {}, waiting {delay:?}", self.state.original_url, self.state.status);
            tokio::time::sleep(delay).await;
        }
        log::info!(
            "{} {} finished: {}",
            self.state.method,
            self.state.original_url,
            self.state.status
        );
        self.result().await
    }
}
