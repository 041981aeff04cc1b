use super::common::{AdditionalProperties, Resource};
use serde::{Deserialize, Serialize};

/// Response for the CheckDnsNameAvailability API service call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsNameAvailabilityResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Security providers supported by a virtual WAN.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWanSecurityProviders {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_providers: Vec<VirtualWanSecurityProvider>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualWanSecurityProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `External` or `Native`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

/// Virtual machine referenced by a Bastion shareable link.
pub type Vm = Resource<serde_json::Value>;

/// A VM and the shareable link Bastion created for it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BastionShareableLink {
    pub vm: Vm,
    /// The link itself. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bsl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// VMs whose shareable links are listed or deleted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BastionShareableLinkListRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vms: Vec<BastionShareableLink>,
}

impl BastionShareableLinkListRequest {
    /// Request naming VMs by resource ID.
    pub fn for_vms<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BastionShareableLinkListRequest {
            vms: ids
                .into_iter()
                .map(|id| BastionShareableLink {
                    vm: Vm {
                        id: Some(id.into()),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .collect(),
        }
    }
}

/// Bastion session IDs to disconnect.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionIds {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub session_ids: Vec<String>,
}

/// Outcome of disconnecting one Bastion session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BastionSessionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWanVpnProfileParameters {
    /// VpnServerConfiguration the profile is generated for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpn_server_configuration_resource_id: Option<String>,
    /// `EAPTLS` or `EAPMSCHAPv2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method: Option<String>,
}

/// SAS URL of a generated VPN profile package.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VpnProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}
