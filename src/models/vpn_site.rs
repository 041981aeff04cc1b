use super::common::{AdditionalProperties, AddressSpace, ProvisioningState, Resource, SubResource};
use serde::{Deserialize, Serialize};

/// VpnSite resource.
pub type VpnSite = Resource<VpnSiteProperties>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VpnSiteProperties {
    /// The VirtualWAN to which the vpnSite belongs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_wan: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_properties: Option<DeviceProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_space: Option<AddressSpace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_security_site: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpn_site_links: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_speed_in_mbps: Option<i32>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
