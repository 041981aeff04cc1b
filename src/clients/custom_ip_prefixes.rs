use crate::error::Result;
use crate::models::{CustomIpPrefix, TagsObject};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const PREFIX_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/customIpPrefixes/{customIpPrefixName}";
const RESOURCE_GROUP_LIST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/customIpPrefixes";
const SUBSCRIPTION_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/customIpPrefixes";

/// Operations on custom (bring-your-own) IP prefixes.
#[derive(Debug, Clone)]
pub struct CustomIpPrefixesClient {
    client: ArmClient,
    subscription_id: String,
}

impl CustomIpPrefixesClient {
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
        CustomIpPrefixesClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn prefix_request(
        &self,
        method: Method,
        resource_group_name: &str,
        custom_ip_prefix_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            PREFIX_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("customIpPrefixName", custom_ip_prefix_name),
            ],
        )
    }

    /// Creates or updates a custom IP prefix. The final resource is read from `Location`.
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        custom_ip_prefix_name: &str,
        parameters: &CustomIpPrefix,
        options: Option<BeginOptions>,
    ) -> Result<Poller<CustomIpPrefix>> {
        self.client
            .begin(
                options,
                || {
                    let mut req =
                        self.prefix_request(Method::PUT, resource_group_name, custom_ip_prefix_name)?;
                    req.set_json(parameters)?;
                    Ok(req)
                },
                &[200, 201],
                FinalStateVia::Location,
            )
            .await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        custom_ip_prefix_name: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || self.prefix_request(Method::DELETE, resource_group_name, custom_ip_prefix_name),
                &[200, 202, 204],
                FinalStateVia::Location,
            )
            .await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        custom_ip_prefix_name: &str,
        expand: Option<&str>,
    ) -> Result<CustomIpPrefix> {
        let mut req = self.prefix_request(Method::GET, resource_group_name, custom_ip_prefix_name)?;
        if let Some(expand) = expand {
            req.set_query("$expand", expand);
        }
        self.client.send(req, &[200]).await?.json()
    }

    pub fn list_pager(&self, resource_group_name: &str) -> Pager<CustomIpPrefix> {
        self.client.pager(self.client.request(
            Method::GET,
            RESOURCE_GROUP_LIST_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
            ],
        ))
    }

    pub fn list_all_pager(&self) -> Pager<CustomIpPrefix> {
        self.client.pager(self.client.request(
            Method::GET,
            SUBSCRIPTION_LIST_PATH,
            &[("subscriptionId", self.subscription_id.as_str())],
        ))
    }

    pub async fn update_tags(
        &self,
        resource_group_name: &str,
        custom_ip_prefix_name: &str,
        parameters: &TagsObject,
    ) -> Result<CustomIpPrefix> {
        let mut req =
            self.prefix_request(Method::PATCH, resource_group_name, custom_ip_prefix_name)?;
        req.set_json(parameters)?;
        self.client.send(req, &[200]).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_arm_client_with;
    use crate::models::CustomIpPrefixPropertiesFormat;
    use crate::runtime::testing::MockTransport;
    use std::time::Duration;

    const MONITOR: &str = "https://management.azure.com/subscriptions/subid/providers/Microsoft.Network/locations/westus/operations/op1?api-version=2024-05-01";
    const LOCATION: &str = "https://management.azure.com/subscriptions/subid/providers/Microsoft.Network/locations/westus/operationResults/op1?api-version=2024-05-01";

    #[tokio::test]
    async fn test_create_reads_final_state_from_location() {
        let transport = MockTransport::new();
        transport.push(
            201,
            &[("Azure-AsyncOperation", MONITOR), ("Location", LOCATION)],
            r#"{"name": "test-customipprefix", "properties": {"provisioningState": "Updating"}}"#,
        );
        transport.push(200, &[], r#"{"status": "Succeeded"}"#);
        transport.push(
            200,
            &[],
            r#"{"name": "test-customipprefix", "location": "westus", "properties": {"cidr": "0.0.0.0/24", "provisioningState": "Succeeded"}}"#,
        );
        let client = CustomIpPrefixesClient::with_client("subid", test_arm_client_with(transport.clone()));
        let parameters = CustomIpPrefix {
            location: Some("westus".to_string()),
            properties: Some(CustomIpPrefixPropertiesFormat {
                cidr: Some("0.0.0.0/24".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut poller = client
            .begin_create_or_update("rg1", "test-customipprefix", &parameters, None)
            .await
            .unwrap();
        let prefix = poller
            .poll_until_done(Some(Duration::from_millis(1)))
            .await
            .unwrap();
        assert_eq!(
            prefix.properties.and_then(|p| p.cidr).as_deref(),
            Some("0.0.0.0/24")
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].method(), &Method::PUT);
        assert_eq!(requests[2].url().as_str(), LOCATION);
    }
}
