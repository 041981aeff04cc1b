use crate::error::Result;
use crate::models::{
    BastionSessionState, BastionShareableLink, BastionShareableLinkListRequest,
    DnsNameAvailabilityResult, SessionIds, VirtualWanSecurityProviders,
    VirtualWanVpnProfileParameters, VpnProfileResponse,
};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const CHECK_DNS_PATH: &str = "/subscriptions/{subscriptionId}/providers/Microsoft.Network/locations/{location}/CheckDnsNameAvailability";
const VIRTUAL_WAN_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/virtualWans/{virtualWANName}";
const BASTION_HOST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/bastionHosts/{bastionHostName}";

/// Subscription level operations that don't belong to one resource type.
#[derive(Debug, Clone)]
pub struct NetworkManagementClient {
    client: ArmClient,
    subscription_id: String,
}

impl NetworkManagementClient {
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
        NetworkManagementClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    /// Checks whether a domain name in the cloudapp.azure.com zone is available for use.
    pub async fn check_dns_name_availability(
        &self,
        location: &str,
        domain_name_label: &str,
    ) -> Result<DnsNameAvailabilityResult> {
        let req = self.check_dns_name_availability_request(location, domain_name_label)?;
        self.client.send(req, &[200]).await?.json()
    }

    fn check_dns_name_availability_request(
        &self,
        location: &str,
        domain_name_label: &str,
    ) -> Result<Request> {
        let mut req = self.client.request(
            Method::GET,
            CHECK_DNS_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("location", location),
            ],
        )?;
        req.set_query("domainNameLabel", domain_name_label);
        Ok(req)
    }

    fn virtual_wan_request(
        &self,
        method: Method,
        suffix: &str,
        resource_group_name: &str,
        virtual_wan_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            &format!("{VIRTUAL_WAN_PATH}{suffix}"),
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("virtualWANName", virtual_wan_name),
            ],
        )
    }

    /// POST to an action of a Bastion host with a JSON body.
    fn bastion_request<B: serde::Serialize>(
        &self,
        action: &str,
        resource_group_name: &str,
        bastion_host_name: &str,
        body: &B,
    ) -> Result<Request> {
        let mut req = self.client.request(
            Method::POST,
            &format!("{BASTION_HOST_PATH}/{action}"),
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("bastionHostName", bastion_host_name),
            ],
        )?;
        req.set_json(body)?;
        Ok(req)
    }

    /// Security providers a virtual WAN supports.
    pub async fn supported_security_providers(
        &self,
        resource_group_name: &str,
        virtual_wan_name: &str,
    ) -> Result<VirtualWanSecurityProviders> {
        let req = self.virtual_wan_request(
            Method::GET,
            "/supportedSecurityProviders",
            resource_group_name,
            virtual_wan_name,
        )?;
        self.client.send(req, &[200]).await?.json()
    }

    /// Generates a VPN profile for a P2S client of the virtual WAN's VPN
    /// server configuration.
    pub async fn begin_generate_virtual_wan_vpn_server_configuration_vpn_profile(
        &self,
        resource_group_name: &str,
        virtual_wan_name: &str,
        vpn_client_params: &VirtualWanVpnProfileParameters,
        options: Option<BeginOptions>,
    ) -> Result<Poller<VpnProfileResponse>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.virtual_wan_request(
                        Method::POST,
                        "/GenerateVpnProfile",
                        resource_group_name,
                        virtual_wan_name,
                    )?;
                    req.set_json(vpn_client_params)?;
                    Ok(req)
                },
                &[200, 202],
                FinalStateVia::Location,
            )
            .await
    }

    /// Deletes the Bastion shareable links of the listed VMs.
    pub async fn begin_delete_bastion_shareable_link(
        &self,
        resource_group_name: &str,
        bastion_host_name: &str,
        bsl_request: &BastionShareableLinkListRequest,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || {
                    self.bastion_request(
                        "deleteShareableLinks",
                        resource_group_name,
                        bastion_host_name,
                        bsl_request,
                    )
                },
                &[200, 202],
                FinalStateVia::Location,
            )
            .await
    }

    /// Shareable links of the listed VMs. The first page is a POST, later
    /// pages follow `nextLink`.
    pub fn get_bastion_shareable_link_pager(
        &self,
        resource_group_name: &str,
        bastion_host_name: &str,
        bsl_request: &BastionShareableLinkListRequest,
    ) -> Pager<BastionShareableLink> {
        self.client.pager(self.bastion_request(
            "getShareableLinks",
            resource_group_name,
            bastion_host_name,
            bsl_request,
        ))
    }

    /// Disconnects the given Bastion sessions, one state per session.
    pub fn disconnect_active_sessions_pager(
        &self,
        resource_group_name: &str,
        bastion_host_name: &str,
        session_ids: &SessionIds,
    ) -> Pager<BastionSessionState> {
        self.client.pager(self.bastion_request(
            "disconnectActiveSessions",
            resource_group_name,
            bastion_host_name,
            session_ids,
        ))
    }
}
