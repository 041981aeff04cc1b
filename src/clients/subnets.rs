use crate::error::Result;
use crate::models::{PrepareNetworkPoliciesRequest, Subnet, UnprepareNetworkPoliciesRequest};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const SUBNET_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/virtualNetworks/{virtualNetworkName}/subnets/{subnetName}";
const LIST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/virtualNetworks/{virtualNetworkName}/subnets";

/// Operations on the subnets of a virtual network.
#[derive(Debug, Clone)]
pub struct SubnetsClient {
    client: ArmClient,
    subscription_id: String,
}

impl SubnetsClient {
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
        SubnetsClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn subnet_request(
        &self,
        method: Method,
        suffix: &str,
        resource_group_name: &str,
        virtual_network_name: &str,
        subnet_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            &format!("{SUBNET_PATH}{suffix}"),
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("virtualNetworkName", virtual_network_name),
                ("subnetName", subnet_name),
            ],
        )
    }

    /// Creates or updates a subnet in the specified virtual network.
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        subnet_name: &str,
        subnet_parameters: &Subnet,
        options: Option<BeginOptions>,
    ) -> Result<Poller<Subnet>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.subnet_request(
                        Method::PUT,
                        "",
                        resource_group_name,
                        virtual_network_name,
                        subnet_name,
                    )?;
                    req.set_json(subnet_parameters)?;
                    Ok(req)
                },
                &[200, 201],
                FinalStateVia::AzureAsyncOperation,
            )
            .await
    }

    /// Deletes the specified subnet.
    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        subnet_name: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || {
                    self.subnet_request(
                        Method::DELETE,
                        "",
                        resource_group_name,
                        virtual_network_name,
                        subnet_name,
                    )
                },
                &[200, 202, 204],
                FinalStateVia::Location,
            )
            .await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        subnet_name: &str,
        expand: Option<&str>,
    ) -> Result<Subnet> {
        let mut req = self.subnet_request(
            Method::GET,
            "",
            resource_group_name,
            virtual_network_name,
            subnet_name,
        )?;
        if let Some(expand) = expand {
            req.set_query("$expand", expand);
        }
        self.client.send(req, &[200]).await?.json()
    }

    /// All subnets in a virtual network.
    pub fn list_pager(&self, resource_group_name: &str, virtual_network_name: &str) -> Pager<Subnet> {
        self.client.pager(self.client.request(
            Method::GET,
            LIST_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("virtualNetworkName", virtual_network_name),
            ],
        ))
    }

    /// Prepares a subnet by applying network intent policies.
    pub async fn begin_prepare_network_policies(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        subnet_name: &str,
        parameters: &PrepareNetworkPoliciesRequest,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.subnet_request(
                        Method::POST,
                        "/PrepareNetworkPolicies",
                        resource_group_name,
                        virtual_network_name,
                        subnet_name,
                    )?;
                    req.set_json(parameters)?;
                    Ok(req)
                },
                &[200, 202],
                FinalStateVia::Location,
            )
            .await
    }

    /// Unprepares a subnet by removing network intent policies.
    pub async fn begin_unprepare_network_policies(
        &self,
        resource_group_name: &str,
        virtual_network_name: &str,
        subnet_name: &str,
        parameters: &UnprepareNetworkPoliciesRequest,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.subnet_request(
                        Method::POST,
                        "/UnprepareNetworkPolicies",
                        resource_group_name,
                        virtual_network_name,
                        subnet_name,
                    )?;
                    req.set_json(parameters)?;
                    Ok(req)
                },
                &[200, 202],
                FinalStateVia::Location,
            )
            .await
    }
}
