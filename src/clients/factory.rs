use super::{
    AzureFirewallsClient, CustomIpPrefixesClient, ExpressRouteCrossConnectionsClient,
    ExpressRouteGatewaysClient, NetworkManagementClient, SubnetsClient, VirtualNetworksClient,
    VpnSitesClient, WebCategoriesClient,
};
use crate::error::Result;
use crate::runtime::{ArmClient, ClientOptions, TokenCredential};
use std::sync::Arc;

/// Builds operation clients that share one pipeline, token cache and subscription.
#[derive(Debug, Clone)]
pub struct ClientFactory {
    client: ArmClient,
    subscription_id: String,
}

impl ClientFactory {
    pub fn new(
        subscription_id: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
        options: Option<ClientOptions>,
    ) -> Result<Self> {
        Ok(ClientFactory {
            client: ArmClient::new(credential, options)?,
            subscription_id: subscription_id.into(),
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn new_azure_firewalls_client(&self) -> AzureFirewallsClient {
        AzureFirewallsClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_custom_ip_prefixes_client(&self) -> CustomIpPrefixesClient {
        CustomIpPrefixesClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_express_route_cross_connections_client(&self) -> ExpressRouteCrossConnectionsClient {
        ExpressRouteCrossConnectionsClient::with_client(
            self.subscription_id.clone(),
            self.client.clone(),
        )
    }

    pub fn new_express_route_gateways_client(&self) -> ExpressRouteGatewaysClient {
        ExpressRouteGatewaysClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_management_client(&self) -> NetworkManagementClient {
        NetworkManagementClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_subnets_client(&self) -> SubnetsClient {
        SubnetsClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_virtual_networks_client(&self) -> VirtualNetworksClient {
        VirtualNetworksClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_vpn_sites_client(&self) -> VpnSitesClient {
        VpnSitesClient::with_client(self.subscription_id.clone(), self.client.clone())
    }

    pub fn new_web_categories_client(&self) -> WebCategoriesClient {
        WebCategoriesClient::with_client(self.subscription_id.clone(), self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::MockTransport;
    use crate::runtime::StaticTokenCredential;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_clients_share_pipeline() {
        let transport = MockTransport::new();
        transport.push(200, &[], r#"{"name": "vnet1", "location": "westus"}"#);
        transport.push(
            200,
            &[],
            r#"{"available": true}"#,
        );
        let options = ClientOptions {
            transport: Some(transport.clone()),
            ..ClientOptions::default()
        };
        let credential = Arc::new(StaticTokenCredential::new(
            "fake-token",
            Utc::now() + Duration::hours(1),
        ));
        let factory = ClientFactory::new("subid", credential, Some(options)).unwrap();
        assert_eq!(factory.subscription_id(), "subid");

        let vnet = factory
            .new_virtual_networks_client()
            .get("rg1", "vnet1", None)
            .await
            .unwrap();
        assert_eq!(vnet.name.as_deref(), Some("vnet1"));
        let dns = factory
            .new_management_client()
            .check_dns_name_availability("westus", "testdns")
            .await
            .unwrap();
        assert_eq!(dns.available, Some(true));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        for req in &requests {
            assert_eq!(
                req.headers()[reqwest::header::AUTHORIZATION],
                "Bearer fake-token"
            );
            assert!(req.url().path().starts_with("/subscriptions/subid/"));
        }
    }
}
