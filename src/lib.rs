//! Client library for the Azure Resource Manager `Microsoft.Network` API.
//!
//! Each resource type has its own operation client (see [`clients`]).
//! Simple reads return the decoded model. List operations return a
//! [`runtime::Pager`] that follows `nextLink`. Long-running operations
//! (`begin_*`) return a [`runtime::Poller`] that tracks the operation until
//! it is done.
//!
//! ```no_run
//! use azure_network_arm::{AzureIdentityCredential, ClientFactory};
//! use std::sync::Arc;
//!
//! # async fn run() -> azure_network_arm::Result<()> {
//! let credential = Arc::new(AzureIdentityCredential::from_environment());
//! let factory = ClientFactory::new("<subscription-id>", credential, None)?;
//! let vnets = factory.new_virtual_networks_client();
//! for vnet in vnets.list_all_pager().collect_all().await? {
//!     println!("{}", vnet.name.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod runtime;
pub mod summary;

pub use clients::{
    AzureFirewallsClient, ClientFactory, CustomIpPrefixesClient,
    ExpressRouteCrossConnectionsClient, ExpressRouteGatewaysClient, NetworkManagementClient,
    SubnetsClient, VirtualNetworksClient, VpnSitesClient, WebCategoriesClient,
};
pub use config::Cloud;
pub use error::{Error, ResponseError, Result};
pub use runtime::{
    AccessToken, AzureIdentityCredential, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller,
    RetryOptions, StaticTokenCredential, TokenCredential,
};
