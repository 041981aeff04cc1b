use super::common::{AdditionalProperties, ProvisioningState, Resource, SubResource};
use serde::{Deserialize, Serialize};

/// Custom IP prefix resource (bring-your-own-IP).
pub type CustomIpPrefix = Resource<CustomIpPrefixPropertiesFormat>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomIpPrefixPropertiesFormat {
    /// The prefix range in CIDR notation. Should include the start address and the prefix length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_message: Option<String>,
    /// `Provisioning`, `Provisioned`, `Commissioning`, `Commissioned`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commissioned_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ip_prefix_parent: Option<SubResource>,
    #[serde(rename = "publicIpPrefixes", skip_serializing_if = "Option::is_none")]
    pub public_ip_prefixes: Option<Vec<SubResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
