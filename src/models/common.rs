//! Envelopes and small types shared by every Microsoft.Network resource.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Resource tags.
pub type Tags = BTreeMap<String, String>;

/// Unmodelled JSON members kept verbatim.
pub type AdditionalProperties = serde_json::Map<String, serde_json::Value>;

/// A tracked ARM resource (has a location and tags).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource<P> {
    /// Resource ID. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource type, e.g. `Microsoft.Network/virtualNetworks`. Read-only.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    /// Changes whenever the resource is updated. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Availability zones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
    /// Top-level members such as `extendedLocation` or `sku`.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A child resource addressed under its parent (e.g. a subnet).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubResourceEntity<P> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Reference to another resource by ID.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SubResource {
    pub fn new(id: impl Into<String>) -> Self {
        SubResource {
            id: Some(id.into()),
        }
    }
}

/// Body of the `UpdateTags` (PATCH) operations.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl<K, V> FromIterator<(K, V)> for TagsObject
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TagsObject {
            tags: Some(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}

/// Provisioning state of a resource. States this crate does not know are
/// kept as sent so they survive a read-modify-write.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ProvisioningState {
    Succeeded,
    Updating,
    Deleting,
    Failed,
    Other(String),
}

impl ProvisioningState {
    pub fn as_str(&self) -> &str {
        match self {
            ProvisioningState::Succeeded => "Succeeded",
            ProvisioningState::Updating => "Updating",
            ProvisioningState::Deleting => "Deleting",
            ProvisioningState::Failed => "Failed",
            ProvisioningState::Other(s) => s,
        }
    }
}

impl From<String> for ProvisioningState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Succeeded" => ProvisioningState::Succeeded,
            "Updating" => ProvisioningState::Updating,
            "Deleting" => ProvisioningState::Deleting,
            "Failed" => ProvisioningState::Failed,
            _ => ProvisioningState::Other(s),
        }
    }
}

impl From<ProvisioningState> for String {
    fn from(state: ProvisioningState) -> Self {
        match state {
            ProvisioningState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a list operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// URL of the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        ListResult {
            value: Vec::new(),
            next_link: None,
        }
    }
}

/// Error payload returned by ARM.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CloudError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CloudErrorBody>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CloudErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudErrorBody>,
}

/// Address prefixes of a virtual network or VPN site.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_prefixes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_result_without_value() {
        let page: ListResult<SubResource> = serde_json::from_str(r#"{"nextLink": null}"#).unwrap();
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }

    #[test]
    fn test_unknown_provisioning_state_kept() {
        let state: ProvisioningState = serde_json::from_str(r#""Migrating""#).unwrap();
        assert_eq!(state, ProvisioningState::Other("Migrating".to_string()));
        assert_eq!(serde_json::to_string(&state).unwrap(), r#""Migrating""#);
        assert_eq!(state.to_string(), "Migrating");

        let state: ProvisioningState = serde_json::from_str(r#""Succeeded""#).unwrap();
        assert_eq!(state, ProvisioningState::Succeeded);
        assert_eq!(state.to_string(), "Succeeded");
    }

    #[test]
    fn test_envelopes_keep_unmodelled_members() {
        let raw = serde_json::json!({
            "name": "vnet1",
            "location": "westus",
            "extendedLocation": {"name": "losangeles", "type": "EdgeZone"},
            "properties": {"prefix": 1}
        });
        let res: Resource<serde_json::Value> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            res.additional_properties.get("extendedLocation"),
            Some(&serde_json::json!({"name": "losangeles", "type": "EdgeZone"}))
        );
        assert_eq!(serde_json::to_value(&res).unwrap(), raw);

        let raw = serde_json::json!({"name": "child", "systemData": {"createdBy": "me"}});
        let child: SubResourceEntity<serde_json::Value> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&child).unwrap(), raw);
    }

    #[test]
    fn test_tags_object_from_pairs() {
        let tags: TagsObject = [("tag1", "value1"), ("tag2", "value2")].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            serde_json::json!({"tags": {"tag1": "value1", "tag2": "value2"}})
        );
    }

    #[test]
    fn test_resource_skips_empty_fields() {
        let res: Resource<AddressSpace> = Resource {
            location: Some("eastus".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            serde_json::json!({"location": "eastus"})
        );
    }
}
