use crate::error::Result;
use crate::models::{
    ExpressRouteCircuitArpTable, ExpressRouteCircuitRoutesTable, ExpressRouteCrossConnection,
    ExpressRouteCrossConnectionRoutesTableSummary, ListResult, TagsObject,
};
use crate::runtime::{
    ArmClient, BeginOptions, ClientOptions, FinalStateVia, Pager, Poller, Request, TokenCredential,
};
use reqwest::Method;
use std::sync::Arc;

const CROSS_CONNECTION_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/expressRouteCrossConnections/{crossConnectionName}";
const RESOURCE_GROUP_LIST_PATH: &str = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/expressRouteCrossConnections";
const SUBSCRIPTION_LIST_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/expressRouteCrossConnections";

/// Per-peering tables a cross connection exposes for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeeringTable {
    Arp,
    Routes,
    RoutesSummary,
}

impl PeeringTable {
    fn segment(self) -> &'static str {
        match self {
            PeeringTable::Arp => "arpTables",
            PeeringTable::Routes => "routeTables",
            PeeringTable::RoutesSummary => "routeTablesSummary",
        }
    }
}

/// Operations on ExpressRoute cross connections (provider side of a circuit).
#[derive(Debug, Clone)]
pub struct ExpressRouteCrossConnectionsClient {
    client: ArmClient,
    subscription_id: String,
}

impl ExpressRouteCrossConnectionsClient {
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
        ExpressRouteCrossConnectionsClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    fn cross_connection_request(
        &self,
        method: Method,
        resource_group_name: &str,
        cross_connection_name: &str,
    ) -> Result<Request> {
        self.client.request(
            method,
            CROSS_CONNECTION_PATH,
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("crossConnectionName", cross_connection_name),
            ],
        )
    }

    fn peering_table_request(
        &self,
        table: PeeringTable,
        resource_group_name: &str,
        cross_connection_name: &str,
        peering_name: &str,
        device_path: &str,
    ) -> Result<Request> {
        self.client.request(
            Method::POST,
            &format!(
                "{CROSS_CONNECTION_PATH}/peerings/{{peeringName}}/{}/{{devicePath}}",
                table.segment()
            ),
            &[
                ("subscriptionId", self.subscription_id.as_str()),
                ("resourceGroupName", resource_group_name),
                ("crossConnectionName", cross_connection_name),
                ("peeringName", peering_name),
                ("devicePath", device_path),
            ],
        )
    }

    /// Update the specified ExpressRouteCrossConnection.
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        cross_connection_name: &str,
        parameters: &ExpressRouteCrossConnection,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ExpressRouteCrossConnection>> {
        self.client
            .begin(
                options,
                || {
                    let mut req = self.cross_connection_request(
                        Method::PUT,
                        resource_group_name,
                        cross_connection_name,
                    )?;
                    req.set_json(parameters)?;
                    Ok(req)
                },
                &[200],
                FinalStateVia::AzureAsyncOperation,
            )
            .await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        cross_connection_name: &str,
    ) -> Result<ExpressRouteCrossConnection> {
        let req =
            self.cross_connection_request(Method::GET, resource_group_name, cross_connection_name)?;
        self.client.send(req, &[200]).await?.json()
    }

    pub fn list_pager(&self) -> Pager<ExpressRouteCrossConnection> {
        self.client.pager(self.client.request(
            Method::GET,
            SUBSCRIPTION_LIST_PATH,
            &[("subscriptionId", self.subscription_id.as_str())],
        ))
    }

    pub fn list_by_resource_group_pager(
        &self,
        resource_group_name: &str,
    ) -> Pager<ExpressRouteCrossConnection> {
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
        cross_connection_name: &str,
        cross_connection_parameters: &TagsObject,
    ) -> Result<ExpressRouteCrossConnection> {
        let mut req =
            self.cross_connection_request(Method::PATCH, resource_group_name, cross_connection_name)?;
        req.set_json(cross_connection_parameters)?;
        self.client.send(req, &[200]).await?.json()
    }

    async fn begin_peering_table<T>(
        &self,
        table: PeeringTable,
        resource_group_name: &str,
        cross_connection_name: &str,
        peering_name: &str,
        device_path: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ListResult<T>>>
    where
        T: serde::de::DeserializeOwned,
    {
        self.client
            .begin(
                options,
                || {
                    self.peering_table_request(
                        table,
                        resource_group_name,
                        cross_connection_name,
                        peering_name,
                        device_path,
                    )
                },
                &[200, 202],
                FinalStateVia::Location,
            )
            .await
    }

    /// Currently advertised ARP table of a peering on the primary or secondary device.
    pub async fn begin_list_arp_table(
        &self,
        resource_group_name: &str,
        cross_connection_name: &str,
        peering_name: &str,
        device_path: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ListResult<ExpressRouteCircuitArpTable>>> {
        self.begin_peering_table(
            PeeringTable::Arp,
            resource_group_name,
            cross_connection_name,
            peering_name,
            device_path,
            options,
        )
        .await
    }

    /// Currently advertised routes table of a peering.
    pub async fn begin_list_routes_table(
        &self,
        resource_group_name: &str,
        cross_connection_name: &str,
        peering_name: &str,
        device_path: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ListResult<ExpressRouteCircuitRoutesTable>>> {
        self.begin_peering_table(
            PeeringTable::Routes,
            resource_group_name,
            cross_connection_name,
            peering_name,
            device_path,
            options,
        )
        .await
    }

    /// Route table summary of a peering.
    pub async fn begin_list_routes_table_summary(
        &self,
        resource_group_name: &str,
        cross_connection_name: &str,
        peering_name: &str,
        device_path: &str,
        options: Option<BeginOptions>,
    ) -> Result<Poller<ListResult<ExpressRouteCrossConnectionRoutesTableSummary>>> {
        self.begin_peering_table(
            PeeringTable::RoutesSummary,
            resource_group_name,
            cross_connection_name,
            peering_name,
            device_path,
            options,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_arm_client;

    #[test]
    fn test_peering_table_paths() {
        let client = ExpressRouteCrossConnectionsClient::with_client("subid", test_arm_client());
        let base = "/subscriptions/subid/resourceGroups/CrossConnection-SiliconValley/providers/Microsoft.Network/expressRouteCrossConnections/%3CcircuitServiceKey%3E/peerings/AzurePrivatePeering";
        for (table, segment) in [
            (PeeringTable::Arp, "arpTables"),
            (PeeringTable::Routes, "routeTables"),
            (PeeringTable::RoutesSummary, "routeTablesSummary"),
        ] {
            let req = client
                .peering_table_request(
                    table,
                    "CrossConnection-SiliconValley",
                    "<circuitServiceKey>",
                    "AzurePrivatePeering",
                    "primary",
                )
                .unwrap();
            assert_eq!(req.method(), &Method::POST);
            assert_eq!(req.url().path(), format!("{base}/{segment}/primary"));
        }
    }

    #[test]
    fn test_empty_device_path() {
        let client = ExpressRouteCrossConnectionsClient::with_client("subid", test_arm_client());
        let err = client
            .peering_table_request(PeeringTable::Arp, "rg", "cc", "AzurePrivatePeering", "")
            .unwrap_err();
        assert_eq!(err.to_string(), "parameter devicePath cannot be empty");
    }
}
