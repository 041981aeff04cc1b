//! HTTP runtime shared by all clients: request building, the retrying and
//! authenticating pipeline, paging and long-running operation polling.

mod client;
mod credential;
mod pager;
mod pipeline;
mod policy;
mod poller;
mod request;
mod response;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ArmClient, ClientOptions};
pub use credential::{AccessToken, AzureIdentityCredential, StaticTokenCredential, TokenCredential};
pub use pager::Pager;
pub use pipeline::{user_agent, Pipeline, ReqwestTransport, Transport, HEADER_CLIENT_REQUEST_ID};
pub use policy::{retry_after, BearerTokenPolicy, RetryOptions, RETRYABLE_STATUS_CODES};
pub use poller::{BeginOptions, FinalStateVia, Poller};
pub use request::{expand_path, join_path, Request, API_VERSION_PARAM};
pub use response::Response;
