//! Virtual networks and subnets.

use super::common::{AdditionalProperties, AddressSpace, ProvisioningState, Resource, SubResource, SubResourceEntity};
use serde::{Deserialize, Serialize};

/// Virtual Network resource.
pub type VirtualNetwork = Resource<VirtualNetworkPropertiesFormat>;

/// Subnet in a virtual network resource.
pub type Subnet = SubResourceEntity<SubnetPropertiesFormat>;

/// Subnet delegation to a service.
pub type Delegation = SubResourceEntity<ServiceDelegationPropertiesFormat>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkPropertiesFormat {
    /// Address prefixes the virtual network can use for its subnets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_space: Option<AddressSpace>,
    /// DNS servers handed out to VMs in the virtual network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhcp_options: Option<DhcpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Subnet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_ddos_protection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddos_protection_plan: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DhcpOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetPropertiesFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_prefixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_security_group: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_table: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegations: Option<Vec<Delegation>>,
    /// IP configurations (NICs and other endpoints) using this subnet. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_configurations: Option<Vec<SubResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_endpoint_network_policies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_link_service_network_policies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDelegationPropertiesFormat {
    /// e.g. `Microsoft.Sql/managedInstances`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Response of `CheckIPAddressAvailability`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressAvailabilityResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Free addresses close to the requested one when it is taken.
    #[serde(
        rename = "availableIPAddresses",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub available_ip_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_platform_reserved: Option<bool>,
}

/// Usage of a subnet's address space.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkUsage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<VirtualNetworkUsageName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkUsageName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrepareNetworkPoliciesRequest {
    /// Service the network policies are prepared for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_intent_policy_configurations: Option<Vec<serde_json::Value>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnprepareNetworkPoliciesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_keeps_unmodelled_properties() {
        let raw = serde_json::json!({
            "id": "/subscriptions/subid/resourceGroups/subnet-test/providers/Microsoft.Network/virtualNetworks/vnetname/subnets/subnet1",
            "name": "subnet1",
            "properties": {
                "addressPrefix": "10.0.0.0/16",
                "provisioningState": "Succeeded",
                "defaultOutboundAccess": false
            }
        });
        let subnet: Subnet = serde_json::from_value(raw.clone()).unwrap();
        let props = subnet.properties.as_ref().unwrap();
        assert_eq!(props.address_prefix.as_deref(), Some("10.0.0.0/16"));
        assert_eq!(props.provisioning_state, Some(ProvisioningState::Succeeded));
        assert_eq!(
            props.additional_properties.get("defaultOutboundAccess"),
            Some(&serde_json::Value::Bool(false))
        );
        assert_eq!(serde_json::to_value(&subnet).unwrap(), raw);
    }

    #[test]
    fn test_subnet_round_trips_unknown_state_and_delegations() {
        let raw = serde_json::json!({
            "name": "subnet1",
            "properties": {
                "addressPrefix": "10.0.0.0/24",
                "provisioningState": "Creating",
                "delegations": [{
                    "name": "sql",
                    "properties": {
                        "serviceName": "Microsoft.Sql/managedInstances",
                        "provisioningState": "Succeeded",
                        "serviceEndpointPolicyScope": "All"
                    }
                }]
            }
        });
        let subnet: Subnet = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            subnet.properties.as_ref().and_then(|p| p.provisioning_state.clone()),
            Some(ProvisioningState::Other("Creating".to_string()))
        );
        assert_eq!(serde_json::to_value(&subnet).unwrap(), raw);
    }

    #[test]
    fn test_virtual_network_keeps_extended_location() {
        let raw = serde_json::json!({
            "name": "test-vnet",
            "location": "westus",
            "extendedLocation": {"name": "losangeles", "type": "EdgeZone"},
            "properties": {"addressSpace": {"addressPrefixes": ["10.0.0.0/16"]}}
        });
        let vnet: VirtualNetwork = serde_json::from_value(raw.clone()).unwrap();
        assert!(vnet.additional_properties.contains_key("extendedLocation"));
        assert_eq!(serde_json::to_value(&vnet).unwrap(), raw);
    }
}
