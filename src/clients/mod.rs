//! Operation clients, one per Microsoft.Network resource type.
//!
//! Every client is a cheap handle over a shared [`ArmClient`](crate::runtime::ArmClient)
//! plus the subscription it addresses. Build them one by one with `new`, or
//! several at once over one pipeline with [`ClientFactory`].

mod azure_firewalls;
mod custom_ip_prefixes;
mod express_route_cross_connections;
mod express_route_gateways;
mod factory;
mod network_management;
mod subnets;
mod virtual_networks;
mod vpn_sites;
mod web_categories;

pub use azure_firewalls::AzureFirewallsClient;
pub use custom_ip_prefixes::CustomIpPrefixesClient;
pub use express_route_cross_connections::ExpressRouteCrossConnectionsClient;
pub use express_route_gateways::ExpressRouteGatewaysClient;
pub use factory::ClientFactory;
pub use network_management::NetworkManagementClient;
pub use subnets::SubnetsClient;
pub use virtual_networks::VirtualNetworksClient;
pub use vpn_sites::VpnSitesClient;
pub use web_categories::WebCategoriesClient;

#[cfg(test)]
pub(crate) fn test_arm_client() -> crate::runtime::ArmClient {
    test_arm_client_with(crate::runtime::testing::MockTransport::new())
}

/// Client against the public cloud whose requests are answered by `transport`.
#[cfg(test)]
pub(crate) fn test_arm_client_with(
    transport: std::sync::Arc<crate::runtime::testing::MockTransport>,
) -> crate::runtime::ArmClient {
    use crate::runtime::{ClientOptions, RetryOptions, StaticTokenCredential};
    use std::time::Duration;

    let options = ClientOptions {
        retry: RetryOptions {
            retry_delay: Duration::from_millis(1),
            max_retry_delay: Some(Duration::from_millis(5)),
            ..RetryOptions::default()
        },
        transport: Some(transport),
        ..ClientOptions::default()
    };
    let credential = StaticTokenCredential::new("fake-token", chrono::Utc::now() + chrono::Duration::hours(1));
    crate::runtime::ArmClient::new(std::sync::Arc::new(credential), Some(options))
        .expect("test client")
}
