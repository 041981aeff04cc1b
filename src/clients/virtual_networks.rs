use crate::error::Result;
use crate::models::{
    IpAddressAvailabilityResult, TagsObject, VirtualNetwork, VirtualNetworkUsage,
};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const VIRTUAL_NETWORK_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/virtualNetworks/{virtualNetworkName}";
const RESOURCE_GROUP_LIST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/virtualNetworks";
const SUBSCRIPTION_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/virtualNetworks";

/// Operations on virtual networks.
#[derive(Debug, Clone)]
pub struct VirtualNetworksClient {
    client: ArmClient,
    subscription_id: String,
}

impl VirtualNetworksClient {
    pub fn new(
        subscription_id: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
        options: Option<ClientOptions>,
    ) -> Result<Self> {
        Ok(Self::with_client(
            subscription_id,
            ArmClient::new(credential, options)?,
        ))
    }

    pub(crate) fn with_client(subscription_id: impl Into<String>, client: ArmClient) -> Self {
        VirtualNetworksClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn vnet_request(
        &self,
        method: Method,
        suffix: &str,
        resource_group_name: &str,
        virtual_network_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            &format!("{VIRTUAL_NETWORK_PATH}{suffix}"),
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("virtualNetworkName", virtual_network_name),
            ],
        )
    }

    /// Checks whether a private IP address is available for use.
    pub async fn check_ip_address_availability(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        ip_address: &str,
    ) -> Result<IpAddressAvailabilityResult> {
        let req = self.check_ip_address_availability_request(
            resource_group_name,
            virtual_network_name,
            ip_address,
        )?;
        self.client.send(req, &[200]).await?.json()
    }

    fn check_ip_address_availability_request(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        ip_address: &str,
    ) -> Result<Request> {
        let mut req = self.vnet_request(
            Method::GET,
            "/CheckIPAddressAvailability",
            resource_group_name,
            virtual_network_name,
        )?;
        req.set_query("ipAddress", ip_address);
        Ok(req)
    }

    /// Creates or updates a virtual network in the specified resource group.
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        parameters: &VirtualNetwork,
        options: Option<BeginOptions>,
    ) -> Result<Poller<VirtualNetwork>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.vnet_request(
                        Method::PUT,
                        "",
                        resource_group_name,
                        virtual_network_name,
                    )?;
                    req.set_json(parameters)?;
                    Ok(req)
                },
                &[200, 201],
                FinalStateVia::AzureAsyncOperation,
            )
            .await
    }

    /// Deletes the specified virtual network.
    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || self.vnet_request(Method::DELETE, "", resource_group_name, virtual_network_name),
                &[200, 202, 204],
                FinalStateVia::Location,
            )
            .await
    }

    /// Gets the specified virtual network. `expand` expands referenced resources.
    pub async fn get(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        expand: Option<&str>,
    ) -> Result<VirtualNetwork> {
        let req = self.get_request(resource_group_name, virtual_network_name, expand)?;
        self.client.send(req, &[200]).await?.json()
    }

    fn get_request(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        expand: Option<&str>,
    ) -> Result<Request> {
        let mut req =
            self.vnet_request(Method::GET, "", resource_group_name, virtual_network_name)?;
        if let Some(expand) = expand {
            req.set_query("$expand", expand);
        }
        Ok(req)
    }

    /// Virtual networks in a resource group.
    pub fn list_pager(&self, resource_group_name: &str) -> Pager<VirtualNetwork> {
        self.client.pager(self.client.request(
            Method::GET,
            RESOURCE_GROUP_LIST_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
            ],
        ))
    }

    /// Virtual networks in the subscription.
    pub fn list_all_pager(&self) -> Pager<VirtualNetwork> {
        self.client.pager(self.client.request(
            Method::GET,
            SUBSCRIPTION_LIST_PATH,
            &[("subscriptionId", self.subscription_id.as_str())],
        ))
    }

    /// Usage statistics for each subnet of a virtual network.
    pub fn list_usage_pager(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
    ) -> Pager<VirtualNetworkUsage> {
        self.client.pager(self.vnet_request(
            Method::GET,
            "/usages",
            resource_group_name,
            virtual_network_name,
        ))
    }

    /// Updates the tags of a virtual network.
    pub async fn update_tags(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        parameters: &TagsObject,
    ) -> Result<VirtualNetwork> {
        let mut req =
            self.vnet_request(Method::PATCH, "", resource_group_name, virtual_network_name)?;
        req.set_json(parameters)?;
        self.client.send(req, &[200]).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_arm_client;
    use crate::error::Error;

    fn client() -> VirtualNetworksClient {
        VirtualNetworksClient::with_client("subid", test_arm_client())
    }

    #[test]
    fn test_check_ip_address_availability_request() {
        let req = client()
            .check_ip_address_availability_request("rg1", "test-vnet", "10.0.1.4")
            .unwrap();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(
            req.url().path(),
            "/subscriptions/subid/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/test-vnet/CheckIPAddressAvailability"
        );
        assert_eq!(req.query("ipAddress").as_deref(), Some("10.0.1.4"));
        assert_eq!(req.query("api-version").as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_get_request_expand() {
        let c = client();
        let req = c.get_request("rg1", "test-vnet", None).unwrap();
        assert!(req.query("$expand").is_none());
        let req = c.get_request("rg1", "test-vnet", Some("subnets")).unwrap();
        assert_eq!(req.query("$expand").as_deref(), Some("subnets"));
    }

    #[test]
    fn test_empty_names_rejected() {
        let err = client().get_request("rg1", "", None).unwrap_err();
        assert_eq!(err.to_string(), "parameter virtualNetworkName cannot be empty");

        let no_sub = VirtualNetworksClient::with_client("", test_arm_client());
        assert!(matches!(
            no_sub.get_request("rg1", "vnet", None),
            Err(Error::EmptyParameter(p)) if p == "subscriptionId"
        ));
    }

    #[test]
    fn test_usage_path() {
        let req = client()
            .vnet_request(Method::GET, "/usages", "rg 1", "vnet")
            .unwrap();
        assert_eq!(
            req.url().path(),
            "/subscriptions/subid/resourceGroups/rg%201/providers/Microsoft.Network/virtualNetworks/vnet/usages"
        );
    }
}
