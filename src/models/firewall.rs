//! Azure Firewall and the web categories its policies filter on.

use super::common::{AdditionalProperties, ProvisioningState, Resource, SubResource, SubResourceEntity};
use serde::{Deserialize, Serialize};

/// Azure Firewall resource.
pub type AzureFirewall = Resource<AzureFirewallPropertiesFormat>;

pub type AzureFirewallIpConfiguration = SubResourceEntity<AzureFirewallIpConfigurationPropertiesFormat>;

/// Azure Web Category resource.
pub type AzureWebCategory = SubResourceEntity<AzureWebCategoryPropertiesFormat>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureFirewallPropertiesFormat {
    /// `Alert`, `Deny` or `Off`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_intel_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_policy: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_hub: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<AzureFirewallSku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_configurations: Option<Vec<AzureFirewallIpConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureFirewallSku {
    /// `AZFW_VNet` or `AZFW_Hub`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Standard`, `Premium` or `Basic`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureFirewallIpConfigurationPropertiesFormat {
    #[serde(rename = "privateIPAddress", skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress", skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureWebCategoryPropertiesFormat {
    /// The name of the group that the category belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firewall_round_trip() {
        let raw = serde_json::json!({
            "name": "azurefirewall",
            "location": "West US",
            "zones": [],
            "properties": {
                "threatIntelMode": "Alert",
                "ipConfigurations": [{
                    "name": "azureFirewallIpConfiguration",
                    "properties": {
                        "subnet": {"id": "/subscriptions/subid/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vnet2/subnets/AzureFirewallSubnet"},
                        "publicIPAddress": {"id": "/subscriptions/subid/resourceGroups/rg1/providers/Microsoft.Network/publicIPAddresses/pipName"},
                        "privateIPAddressVersion": "IPv4"
                    }
                }]
            }
        });
        let firewall: AzureFirewall = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&firewall).unwrap(), raw);
    }

    #[test]
    fn test_web_category_round_trip() {
        let raw = serde_json::json!({
            "name": "Arts",
            "properties": {"group": "Entertainment", "description": "Sites about art"}
        });
        let category: AzureWebCategory = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            category.properties.as_ref().and_then(|p| p.group.as_deref()),
            Some("Entertainment")
        );
        assert_eq!(serde_json::to_value(&category).unwrap(), raw);
    }
}
