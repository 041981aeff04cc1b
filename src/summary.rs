//! Virtual network / subnet summary printed by the `azure-network-summary` binary.

use crate::models::{Subnet, VirtualNetwork};
use colored::Colorize;
use itertools::Itertools;
use std::net::Ipv4Addr;

/// One printed line: a subnet with the virtual network it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetRow {
    pub vnet_name: String,
    pub vnet_cidr: String,
    pub location: String,
    pub subnet_name: String,
    pub subnet_cidr: String,
    pub nsg: String,
    pub provisioning_state: String,
}

/// Last segment of a resource ID, `None` when empty.
fn resource_name(id: Option<&str>) -> String {
    id.and_then(|id| id.rsplit('/').next())
        .filter(|n| !n.is_empty())
        .unwrap_or("None")
        .to_string()
}

/// Resource group segment of an ARM resource ID.
pub fn resource_group_of(id: &str) -> Option<&str> {
    id.split('/')
        .tuple_windows()
        .find(|(key, _)| key.eq_ignore_ascii_case("resourceGroups"))
        .map(|(_, group)| group)
        .filter(|g| !g.is_empty())
}

/// Sort key for a CIDR: the parsed address and mask. Prefixes that do not
/// parse as IPv4 sort last, by text.
fn cidr_key(cidr: &str) -> (Option<(Ipv4Addr, u8)>, String) {
    let parsed = cidr.split_once('/').and_then(|(addr, mask)| {
        Some((addr.trim().parse::<Ipv4Addr>().ok()?, mask.trim().parse::<u8>().ok()?))
    });
    match parsed {
        Some(key) => (Some(key), String::new()),
        None => (None, cidr.to_string()),
    }
}

/// Rows for `vnet`, one per subnet ordered by prefix. A virtual network
/// without subnets still yields one row so it shows up in the output.
pub fn vnet_rows(vnet: &VirtualNetwork, subnets: &[Subnet]) -> Vec<SubnetRow> {
    let props = vnet.properties.as_ref();
    let vnet_name = vnet.name.clone().unwrap_or_default();
    let vnet_cidr = props
        .and_then(|p| p.address_space.as_ref())
        .map(|a| a.address_prefixes.iter().join(","))
        .unwrap_or_default();
    let location = vnet.location.clone().unwrap_or_default();

    let row = |subnet_name: String, subnet_cidr: String, nsg: String, state: String| SubnetRow {
        vnet_name: vnet_name.clone(),
        vnet_cidr: vnet_cidr.clone(),
        location: location.clone(),
        subnet_name,
        subnet_cidr,
        nsg,
        provisioning_state: state,
    };

    if subnets.is_empty() {
        return vec![row(
            "None".to_string(),
            "none".to_string(),
            "None".to_string(),
            String::new(),
        )];
    }

    subnets
        .iter()
        .map(|s| {
            let p = s.properties.as_ref();
            let cidr = p
                .and_then(|p| {
                    p.address_prefix
                        .clone()
                        .or_else(|| p.address_prefixes.as_ref().map(|a| a.iter().join(",")))
                })
                .unwrap_or_else(|| "none".to_string());
            let nsg = resource_name(
                p.and_then(|p| p.network_security_group.as_ref())
                    .and_then(|n| n.id.as_deref()),
            );
            let state = p
                .and_then(|p| p.provisioning_state.as_ref())
                .map(ToString::to_string)
                .unwrap_or_default();
            row(s.name.clone().unwrap_or_default(), cidr, nsg, state)
        })
        .sorted_by_key(|r| {
            let (addr, text) = cidr_key(&r.subnet_cidr);
            (addr.is_none(), addr, text)
        })
        .collect()
}

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

fn format_row(i: usize, row: &SubnetRow) -> String {
    [
        format_field(i, 5),
        format_field(&row.subnet_cidr, 20),
        format_field(&row.subnet_name, 30),
        format_field(&row.vnet_cidr, 22),
        format_field(&row.vnet_name, 28),
        format_field(&row.location, 14),
        format_field(&row.nsg, 12),
        format_field(&row.provisioning_state, 12),
    ]
    .join(",")
}

/// Print `rows` as CSV to stdout. Subnets that did not provision are shown in red.
pub fn print_rows(rows: &[SubnetRow]) {
    log::info!("#Start print_rows() count = {}", rows.len());
    println!(
        r#""cnt",       "subnet_cidr",                  "subnet_name",             "vnet_cidr",                  "vnet_name",     "location",       "nsg",      "state""#
    );
    for (i, row) in rows.iter().enumerate() {
        let line = format_row(i + 1, row);
        if row.provisioning_state.is_empty() || row.provisioning_state == "Succeeded" {
            println!("{line}");
        } else {
            println!("{}", line.red());
        }
    }
    let vnets = rows.iter().map(|r| r.vnet_name.as_str()).unique().count();
    println!(
        "#{}# {} virtual networks, {} rows",
        "DONE".on_green(),
        vnets,
        rows.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vnet() -> VirtualNetwork {
        serde_json::from_str(
            r#"{
                "name": "test-vnet",
                "location": "eastus",
                "properties": {"addressSpace": {"addressPrefixes": ["10.0.0.0/16", "10.1.0.0/16"]}}
            }"#,
        )
        .unwrap()
    }

    fn subnets() -> Vec<Subnet> {
        serde_json::from_str(
            r#"[
                {"name": "web", "properties": {"addressPrefix": "10.0.2.0/24", "provisioningState": "Succeeded",
                    "networkSecurityGroup": {"id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/networkSecurityGroups/web-nsg"}}},
                {"name": "app", "properties": {"addressPrefix": "10.0.1.0/24", "provisioningState": "Updating"}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_vnet_rows_sorted_by_cidr() {
        let rows = vnet_rows(&vnet(), &subnets());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subnet_name, "app");
        assert_eq!(rows[0].nsg, "None");
        assert_eq!(rows[0].provisioning_state, "Updating");
        assert_eq!(rows[1].subnet_name, "web");
        assert_eq!(rows[1].nsg, "web-nsg");
        assert_eq!(rows[1].vnet_cidr, "10.0.0.0/16,10.1.0.0/16");
        assert_eq!(rows[1].location, "eastus");
    }

    #[test]
    fn test_vnet_rows_sorted_numerically() {
        let subnets: Vec<Subnet> = serde_json::from_str(
            r#"[
                {"name": "ten", "properties": {"addressPrefix": "10.0.10.0/24"}},
                {"name": "odd", "properties": {"addressPrefix": "fd00::/64"}},
                {"name": "two", "properties": {"addressPrefix": "10.0.2.0/24", "provisioningState": "Migrating"}},
                {"name": "two-wide", "properties": {"addressPrefix": "10.0.2.0/23"}}
            ]"#,
        )
        .unwrap();
        let rows = vnet_rows(&vnet(), &subnets);
        let names: Vec<_> = rows.iter().map(|r| r.subnet_name.as_str()).collect();
        assert_eq!(names, vec!["two-wide", "two", "ten", "odd"]);
        assert_eq!(rows[1].provisioning_state, "Migrating");
    }

    #[test]
    fn test_vnet_without_subnets() {
        let rows = vnet_rows(&vnet(), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subnet_name, "None");
        assert_eq!(rows[0].vnet_name, "test-vnet");
    }

    #[test]
    fn test_resource_group_of() {
        assert_eq!(
            resource_group_of("/subscriptions/s/resourceGroups/rg-net/providers/Microsoft.Network/virtualNetworks/v"),
            Some("rg-net")
        );
        assert_eq!(resource_group_of("/subscriptions/s/resourcegroups/RG2"), Some("RG2"));
        assert_eq!(resource_group_of("/subscriptions/s"), None);
    }

    #[test]
    fn test_format_field() {
        assert_eq!(format_field("test", 10), "    \"test\"");
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
        assert_eq!(format_field(42, 6), "  \"42\"");
    }
}
