//! UCS Manager managed-object models
//!
//! These models match the manager's object-model attribute naming (camelCase
//! on the wire). Only the classes this tool touches are modelled: `lsServer`,
//! `vnicEther` and `vnicEtherIf`.

use serde::{Deserialize, Serialize};

/// Resolve-response envelope returned by class and children queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse<T> {
    pub out_configs: Vec<T>,
}

/// Service profile / server node (`lsServer`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LsServer {
    /// Distinguished name, e.g. "org-root/ls-POD-2-blade-3"
    pub dn: String,
    pub name: String,
    /// Node type tag; only "instance" nodes are concrete servers
    #[serde(rename = "type")]
    pub server_type: String,
    /// Association state as reported by the manager, informational only
    #[serde(default)]
    pub assoc_state: Option<String>,
}

/// Virtual Ethernet interface (`vnicEther`) as read back from the manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnicEther {
    /// Distinguished name, "{serverDn}/ether-{name}"
    pub dn: String,
    pub name: String,
    /// MAC address assigned by the manager (may be "derived" until placed)
    #[serde(default)]
    pub addr: String,
    /// Host-side enumeration order, 1-based
    #[serde(default)]
    pub order: String,
    #[serde(default)]
    pub switch_id: String,
    /// Template name as requested
    #[serde(default)]
    pub nw_templ_name: String,
    /// Template name as resolved by the manager; may differ textually from
    /// the requested name and may be empty until binding resolves
    #[serde(default)]
    pub oper_nw_templ_name: String,
    #[serde(default)]
    pub mtu: String,
}

/// VLAN binding child of a vNIC (`vnicEtherIf`), read-only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnicEtherIf {
    pub dn: String,
    pub name: String,
    /// Bound VLAN/network identifier
    #[serde(default)]
    pub vnet: String,
}

/// Desired-state body for a vNIC upsert
///
/// Declaring an existing DN again is a modify; the manager converges the
/// object to these attributes and re-resolves the template binding
/// asynchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnicEtherConfig {
    pub dn: String,
    pub name: String,
    pub order: String,
    pub nw_templ_name: String,
    pub stats_policy_name: String,
    pub switch_id: String,
    pub admin_host_port: String,
    pub admin_vcon: String,
    pub mtu: String,
}

impl VnicEtherConfig {
    /// Build an upsert body for one vNIC slot on a server
    ///
    /// The DN is derived deterministically from the server DN and the vNIC
    /// name; the remaining policy attributes are the fixed values this tool
    /// applies to every interface it manages.
    pub fn for_slot(server_dn: &str, name: &str, template: &str, order: u32) -> Self {
        Self {
            dn: format!("{server_dn}/ether-{name}"),
            name: name.to_string(),
            order: order.to_string(),
            nw_templ_name: template.to_string(),
            stats_policy_name: "default".to_string(),
            switch_id: "A-B".to_string(),
            admin_host_port: "ANY".to_string(),
            admin_vcon: "any".to_string(),
            mtu: "1500".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_slot_derives_dn() {
        let cfg = VnicEtherConfig::for_slot("org-root/ls-POD-2-blade-1", "eth0", "fuel-public", 1);
        assert_eq!(cfg.dn, "org-root/ls-POD-2-blade-1/ether-eth0");
        assert_eq!(cfg.name, "eth0");
        assert_eq!(cfg.order, "1");
        assert_eq!(cfg.nw_templ_name, "fuel-public");
        assert_eq!(cfg.mtu, "1500");
        assert_eq!(cfg.switch_id, "A-B");
    }

    #[test]
    fn test_vnic_ether_deserializes_wire_attributes() {
        let json = serde_json::json!({
            "dn": "org-root/ls-POD-2-blade-1/ether-eth0",
            "name": "eth0",
            "addr": "00:25:B5:00:00:1A",
            "order": "1",
            "switchId": "A-B",
            "nwTemplName": "fuel-public",
            "operNwTemplName": "org-root/lan-conn-templ-fuel-public",
            "mtu": "1500"
        });
        let vnic: VnicEther = serde_json::from_value(json).unwrap();
        assert_eq!(vnic.oper_nw_templ_name, "org-root/lan-conn-templ-fuel-public");
        assert_eq!(vnic.switch_id, "A-B");
    }

    #[test]
    fn test_vnic_ether_tolerates_unresolved_binding() {
        // A freshly declared vNIC can come back before the manager has
        // resolved its template binding.
        let json = serde_json::json!({
            "dn": "org-root/ls-POD-2-blade-1/ether-eth1",
            "name": "eth1"
        });
        let vnic: VnicEther = serde_json::from_value(json).unwrap();
        assert!(vnic.oper_nw_templ_name.is_empty());
        assert!(vnic.addr.is_empty());
    }
}
