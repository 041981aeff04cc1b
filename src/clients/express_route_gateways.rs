use crate::error::Result;
use crate::models::{ExpressRouteGateway, ExpressRouteGatewayList, TagsObject};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const GATEWAY_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/expressRouteGateways/{expressRouteGatewayName}";
const RESOURCE_GROUP_LIST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/expressRouteGateways";
const SUBSCRIPTION_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/expressRouteGateways";

/// Operations on ExpressRoute gateways of virtual hubs.
///
/// Both list operations return a single, unpaged [`ExpressRouteGatewayList`].
#[derive(Debug, Clone)]
pub struct ExpressRouteGatewaysClient {
    client: ArmClient,
    subscription_id: String,
}

impl ExpressRouteGatewaysClient {
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
        ExpressRouteGatewaysClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn gateway_request(
        &self,
        method: Method,
        resource_group_name: &str,
        express_route_gateway_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            GATEWAY_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("expressRouteGatewayName", express_route_gateway_name),
            ],
        )
    }

    /// Creates or updates an ExpressRoute gateway.
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        express_route_gateway_name: &str,
        put_express_route_gateway_parameters: &ExpressRouteGateway,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ExpressRouteGateway>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.gateway_request(
                        Method::PUT,
                        resource_group_name,
                        express_route_gateway_name,
                    )?;
                    req.set_json(put_express_route_gateway_parameters)?;
                    Ok(req)
                },
                &[200, 201],
                FinalStateVia::AzureAsyncOperation,
            )
            .await
    }

    /// Deletes a gateway. Only possible once no connection subresources remain.
    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        express_route_gateway_name: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<()>> {
        self.client
            .begin(
                options,
                || {
                    self.gateway_request(
                        Method::DELETE,
                        resource_group_name,
                        express_route_gateway_name,
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
        express_route_gateway_name: &str,
    ) -> Result<ExpressRouteGateway> {
        let req = self.gateway_request(Method::GET, resource_group_name, express_route_gateway_name)?;
        self.client.send(req, &[200]).await?.json()
    }

    pub async fn list_by_resource_group(
        &self,
        resource_group_name: &str,
    ) -> Result<ExpressRouteGatewayList> {
        let req = self.client.request(
            Method::GET,
            RESOURCE_GROUP_LIST_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
            ],
        )?;
        self.client.send(req, &[200]).await?.json()
    }

    pub async fn list_by_subscription(&self) -> Result<ExpressRouteGatewayList> {
        let req = self.client.request(
            Method::GET,
            SUBSCRIPTION_LIST_PATH,
            &[("subscriptionId", self.subscription_id.as_str())],
        )?;
        self.client.send(req, &[200]).await?.json()
    }

    /// Updates the tags of a gateway.
    pub async fn begin_update_tags(
        &self,
        resource_group_name: &str,
        express_route_gateway_name: &str,
        express_route_gateway_parameters: &TagsObject,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ExpressRouteGateway>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.gateway_request(
                        Method::PATCH,
                        resource_group_name,
                        express_route_gateway_name,
                    )?;
                    req.set_json(express_route_gateway_parameters)?;
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
    use crate::clients::test_arm_client;

    #[test]
    fn test_gateway_request() {
        let client = ExpressRouteGatewaysClient::with_client("subid", test_arm_client());
        let req = client
            .gateway_request(Method::DELETE, "resourceGroupName", "expressRouteGatewayName")
            .unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://management.azure.com/subscriptions/subid/resourceGroups/resourceGroupName/providers/Microsoft.Network/expressRouteGateways/expressRouteGatewayName?api-version=2024-05-01"
        );
        assert!(req.body().is_none());
    }
}
