//! Data transfer objects for the Microsoft.Network resource provider.
//!
//! Resources share two generic envelopes:
//! - [`Resource`] - tracked resources with location and tags
//! - [`SubResourceEntity`] - child resources addressed under a parent
//!
//! Each resource then only defines its `properties` payload. Members a
//! payload does not model are kept in `additional_properties`, so a
//! get-modify-put round trip does not drop anything the service returned.

mod common;
mod custom_ip_prefix;
mod express_route;
mod firewall;
mod network_management;
mod virtual_network;
mod vpn_site;

// Re-export public types
pub use common::{
    AdditionalProperties, AddressSpace, CloudError, CloudErrorBody, ListResult,
    ProvisioningState, Resource, SubResource, SubResourceEntity, Tags, TagsObject,
};
pub use custom_ip_prefix::{CustomIpPrefix, CustomIpPrefixPropertiesFormat};
pub use express_route::{
    AutoScaleBounds, AutoScaleConfiguration, ExpressRouteCircuitArpTable,
    ExpressRouteCircuitRoutesTable, ExpressRouteCrossConnection,
    ExpressRouteCrossConnectionProperties, ExpressRouteCrossConnectionRoutesTableSummary,
    ExpressRouteGateway, ExpressRouteGatewayList, ExpressRouteGatewayProperties,
};
pub use firewall::{
    AzureFirewall, AzureFirewallIpConfiguration, AzureFirewallIpConfigurationPropertiesFormat,
    AzureFirewallPropertiesFormat, AzureFirewallSku, AzureWebCategory,
    AzureWebCategoryPropertiesFormat,
};
pub use network_management::{
    BastionSessionState, BastionShareableLink, BastionShareableLinkListRequest,
    DnsNameAvailabilityResult, SessionIds, VirtualWanSecurityProvider,
    VirtualWanSecurityProviders, VirtualWanVpnProfileParameters, Vm, VpnProfileResponse,
};
pub use virtual_network::{
    Delegation, DhcpOptions, IpAddressAvailabilityResult, PrepareNetworkPoliciesRequest,
    ServiceDelegationPropertiesFormat, Subnet, SubnetPropertiesFormat,
    UnprepareNetworkPoliciesRequest, VirtualNetwork, VirtualNetworkPropertiesFormat,
    VirtualNetworkUsage, VirtualNetworkUsageName,
};
pub use vpn_site::{DeviceProperties, VpnSite, VpnSiteProperties};
