use crate::error::Result;
use crate::models::{AzureFirewall, TagsObject};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const FIREWALL_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/azureFirewalls/{azureFirewallName}";
const RESOURCE_GROUP_LIST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/azureFirewalls";
const SUBSCRIPTION_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/azureFirewalls";

#[derive(Debug, Clone)]
pub struct AzureFirewallsClient {
    client: ArmClient,
    subscription_id: String,
}

impl AzureFirewallsClient {
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
        AzureFirewallsClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn firewall_request(
        &self,
        method: Method,
        resource_group_name: &str,
        azure_firewall_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            FIREWALL_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("azureFirewallName", azure_firewall_name),
            ],
        )
    }

    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        azure_firewall_name: &str,
        parameters: &AzureFirewall,
        options: Option<BeginOptions>,
    ) -> Result<Poller<AzureFirewall>> {
        self.client
            .begin(
                options,
                || {
                    let mut req =
                        self.firewall_request(Method::PUT, resource_group_name, azure_firewall_name)?;
                    req.set_json(parameters)?;
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
        azure_firewall_name: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || self.firewall_request(Method::DELETE, resource_group_name, azure_firewall_name),
                &[200, 202, 204],
                FinalStateVia::Location,
            )
            .await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        azure_firewall_name: &str,
    ) -> Result<AzureFirewall> {
        let req = self.firewall_request(Method::GET, resource_group_name, azure_firewall_name)?;
        self.client.send(req, &[200]).await?.json()
    }

    pub fn list_pager(&self, resource_group_name: &str) -> Pager<AzureFirewall> {
        self.client.pager(self.client.request(
            Method::GET,
            RESOURCE_GROUP_LIST_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
            ],
        ))
    }

    pub fn list_all_pager(&self) -> Pager<AzureFirewall> {
        self.client.pager(self.client.request(
            Method::GET,
            SUBSCRIPTION_LIST_PATH,
            &[("subscriptionId", self.subscription_id.as_str())],
        ))
    }

    /// Updates tags of an Azure Firewall. Long running on this resource.
    pub async fn begin_update_tags(
        &self,
        resource_group_name: &str,
        azure_firewall_name: &str,
        parameters: &TagsObject,
        options: Option<BeginOptions>,
    ) -> Result<Poller<AzureFirewall>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.firewall_request(
                        Method::PATCH,
                        resource_group_name,
                        azure_firewall_name,
                    )?;
                    req.set_json(parameters)?;
                    Ok(req)
                },
                &[200, 202],
                FinalStateVia::AzureAsyncOperation,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_arm_client_with;
    use crate::runtime::testing::MockTransport;

    #[tokio::test]
    async fn test_list_all_follows_next_link() {
        let transport = MockTransport::new();
        let next = "https://management.azure.com/subscriptions/subid/providers/Microsoft.Network/azureFirewalls?api-version=2024-05-01&$skiptoken=2";
        transport.push(
            200,
            &[],
            &format!(r#"{{"value": [{{"name": "azurefirewall1"}}], "nextLink": "{next}"}}"#),
        );
        transport.push(200, &[], r#"{"value": [{"name": "azurefirewall2"}]}"#);
        let client = AzureFirewallsClient::with_client("subid", test_arm_client_with(transport.clone()));

        let firewalls = client.list_all_pager().collect_all().await.unwrap();
        let names: Vec<_> = firewalls.iter().filter_map(|f| f.name.as_deref()).collect();
        assert_eq!(names, vec!["azurefirewall1", "azurefirewall2"]);
        assert_eq!(transport.requests()[1].url().as_str(), next);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let transport = MockTransport::new();
        transport.push(
            404,
            &[],
            r#"{"error": {"code": "ResourceNotFound", "message": "not found"}}"#,
        );
        let client = AzureFirewallsClient::with_client("subid", test_arm_client_with(transport));
        let err = client.get("rg1", "azurefirewall").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(err.as_response_error().unwrap().error_code, "ResourceNotFound");
    }
}
