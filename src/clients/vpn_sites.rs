use crate::error::Result;
use crate::models::{TagsObject, VpnSite};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const VPN_SITE_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/vpnSites/{vpnSiteName}";
const RESOURCE_GROUP_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/vpnSites";
const SUBSCRIPTION_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/vpnSites";

/// Operations on VPN sites.
#[derive(Debug, Clone)]
pub struct VpnSitesClient {
    client: ArmClient,
    subscription_id: String,
}

impl VpnSitesClient {
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
        VpnSitesClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn site_request(
        &self,
        method: Method,
        resource_group_name: &str,
        vpn_site_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            VPN_SITE_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("vpnSiteName", vpn_site_name),
            ],
        )
    }

    /// Creates a VpnSite resource if it doesn't exist else updates the existing VpnSite.
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        vpn_site_name: &str,
        vpn_site_parameters: &VpnSite,
        options: Option<BeginOptions>,
    ) -> Result<Poller<VpnSite>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.site_request(Method::PUT, resource_group_name, vpn_site_name)?;
                    req.set_json(vpn_site_parameters)?;
                    Ok(req)
                },
                &[200, 201],
                FinalStateVia::AzureAsyncOperation,
            )
            .await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        vpn_site_name: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || self.site_request(Method::DELETE, resource_group_name, vpn_site_name),
                &[200, 202, 204],
                FinalStateVia::Location,
            )
            .await
    }

    pub async fn get(&self, resource_group_name: &str, vpn_site_name: &str) -> Result<VpnSite> {
        let req = self.site_request(Method::GET, resource_group_name, vpn_site_name)?;
        self.client.send(req, &[200]).await?.json()
    }

    /// All VPN sites in the subscription.
    pub fn list_pager(&self) -> Pager<VpnSite> {
        self.client.pager(self.client.request(
            Method::GET,
            SUBSCRIPTION_LIST_PATH,
            &[("subscriptionId", self.subscription_id.as_str())],
        ))
    }

    pub fn list_by_resource_group_pager(&self, resource_group_name: &str) -> Pager<VpnSite> {
        self.client.pager(self.client.request(
            Method::GET,
            RESOURCE_GROUP_LIST_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
            ],
        ))
    }

    pub async fn update_tags(
        &self,
        resource_group_name: &str,
        vpn_site_name: &str,
        vpn_site_parameters: &TagsObject,
    ) -> Result<VpnSite> {
        let mut req = self.site_request(Method::PATCH, resource_group_name, vpn_site_name)?;
        req.set_json(vpn_site_parameters)?;
        self.client.send(req, &[200]).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_arm_client;
    use reqwest::header::CONTENT_TYPE;

    #[test]
    fn test_update_tags_body() {
        let client = VpnSitesClient::with_client("subid", test_arm_client());
        let mut req = client.site_request(Method::PATCH, "rg1", "vpnSite1").unwrap();
        let tags: TagsObject = [("key1", "value1"), ("key2", "value2")].into_iter().collect();
        req.set_json(&tags).unwrap();
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            req.body().unwrap().as_ref(),
            br#"{"tags":{"key1":"value1","key2":"value2"}}"#
        );
    }
}
