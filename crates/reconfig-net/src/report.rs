//! Current-configuration report
//!
//! Read-only view of the pod's network state: per server, each vNIC with its
//! MAC and bound VLANs. Runs whether or not a reconciliation preceded it, so
//! the printed state is the operator's drift view after a partial failure.

use crate::enumerate;
use crate::error::AppError;
use std::fmt::Write as _;
use ucsm_client::UcsApi;

/// Render the pod's current network configuration as the report text
pub async fn render_network_config(session: &dyn UcsApi) -> Result<String, AppError> {
    let mut out = String::new();
    out.push_str("\nCURRENT NETWORK CONFIG:\n");

    for server in enumerate::pod_servers(session).await? {
        let _ = writeln!(out, " {}", server.name);

        let vnics = session
            .get_vnics(&server.dn)
            .await
            .map_err(|e| AppError::ReadFailed {
                what: format!("vNICs of server {}", server.name),
                source: e,
            })?;

        for vnic in &vnics {
            let _ = writeln!(out, "  {}", vnic.name);
            let _ = writeln!(out, "   {}", vnic.addr);

            let vnic_ifs = session
                .get_vnic_ifs(&vnic.dn)
                .await
                .map_err(|e| AppError::ReadFailed {
                    what: format!("VLAN bindings of vNIC {}", vnic.dn),
                    source: e,
                })?;
            for vnic_if in &vnic_ifs {
                let _ = writeln!(out, "    Vlan: {}", vnic_if.vnet);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucsm_client::{LsServer, MockUcsSession, VnicEther, VnicEtherIf};

    #[tokio::test]
    async fn test_report_lists_servers_vnics_and_vlans() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(LsServer {
            dn: "org-root/ls-POD-2-blade-1".to_string(),
            name: "POD-2-blade-1".to_string(),
            server_type: "instance".to_string(),
            assoc_state: None,
        });
        mock.add_vnic(VnicEther {
            dn: "org-root/ls-POD-2-blade-1/ether-eth0".to_string(),
            name: "eth0".to_string(),
            addr: "00:25:B5:00:00:1A".to_string(),
            order: "1".to_string(),
            switch_id: "A-B".to_string(),
            nw_templ_name: "fuel-public".to_string(),
            oper_nw_templ_name: "fuel-public".to_string(),
            mtu: "1500".to_string(),
        });
        mock.set_vnic_ifs(
            "org-root/ls-POD-2-blade-1/ether-eth0",
            vec![VnicEtherIf {
                dn: "org-root/ls-POD-2-blade-1/ether-eth0/if-default".to_string(),
                name: "default".to_string(),
                vnet: "120".to_string(),
            }],
        );

        let report = render_network_config(&mock).await.unwrap();
        assert!(report.contains("CURRENT NETWORK CONFIG:"));
        assert!(report.contains(" POD-2-blade-1\n"));
        assert!(report.contains("  eth0\n"));
        assert!(report.contains("   00:25:B5:00:00:1A\n"));
        assert!(report.contains("    Vlan: 120\n"));
    }

    #[tokio::test]
    async fn test_report_skips_out_of_pod_servers() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(LsServer {
            dn: "org-root/ls-POD-1-blade-1".to_string(),
            name: "POD-1-blade-1".to_string(),
            server_type: "instance".to_string(),
            assoc_state: None,
        });

        let report = render_network_config(&mock).await.unwrap();
        assert!(!report.contains("POD-1-blade-1"));
    }
}
