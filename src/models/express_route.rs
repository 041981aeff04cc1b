//! ExpressRoute gateways and cross connections.

use super::common::{AdditionalProperties, ProvisioningState, Resource, SubResource};
use serde::{Deserialize, Serialize};

/// ExpressRoute gateway resource.
pub type ExpressRouteGateway = Resource<ExpressRouteGatewayProperties>;

/// ExpressRouteCrossConnection resource.
pub type ExpressRouteCrossConnection = Resource<ExpressRouteCrossConnectionProperties>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteGatewayProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_configuration: Option<AutoScaleConfiguration>,
    /// The Virtual Hub where the ExpressRoute gateway is or will be deployed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_hub: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_non_virtual_wan_traffic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub express_route_connections: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutoScaleConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<AutoScaleBounds>,
}

/// Minimum and maximum number of scale units to deploy.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoScaleBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

/// Result of the (non paged) ExpressRoute gateway list operations.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExpressRouteGatewayList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<ExpressRouteGateway>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteCrossConnectionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_azure_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_azure_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_tag: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peering_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_in_mbps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub express_route_circuit: Option<SubResource>,
    /// `NotProvisioned`, `Provisioning`, `Provisioned` or `Deprovisioning`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider_provisioning_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// ARP table entry of an ExpressRoute peering.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteCircuitArpTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteCircuitRoutesTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop: Option<String>,
    #[serde(rename = "locPrf", skip_serializing_if = "Option::is_none")]
    pub loc_prf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    /// Autonomous system paths to the destination network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRouteCrossConnectionRoutesTableSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_down: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_prefixes_received: Option<String>,
}
