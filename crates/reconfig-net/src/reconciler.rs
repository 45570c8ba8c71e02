//! Interface reconciliation
//!
//! Converges one server's live vNIC set to a declared network profile in two
//! passes. The converge-up pass unconditionally re-declares every profile
//! slot at its fixed order index; the manager treats re-declaration of an
//! existing DN as a modify, so the pass is idempotent. The converge-down
//! pass then re-reads the live vNIC set and removes every interface the
//! retention predicate does not claim for the profile. The manager offers no
//! in-place rename/reorder, hence wanted interfaces are declared wholesale
//! and only unwanted ones are diffed away.
//!
//! No rollback: a failed add aborts the server's reconciliation with the
//! earlier adds left in place, and the converge-down pass is never reached.

use crate::error::{AppError, ApplyOp};
use crate::profiles::NetworkProfile;
use tracing::info;
use ucsm_client::{LsServer, UcsApi, VnicEther, VnicEtherConfig};

/// Decides whether a live vNIC is claimed by the profile and must be kept
pub type RetentionPredicate = fn(&VnicEther, &NetworkProfile) -> bool;

/// Default retention rule: the vNIC's operational template name contains any
/// of the profile's declared template names as a substring.
///
/// The manager fills in a resolved template name that may differ textually
/// from the requested one, so this is a deliberate leniency rather than an
/// exact match. A template name that is a substring of another unrelated one
/// can therefore false-positive-retain a vNIC.
pub fn template_substring_retained(vnic: &VnicEther, profile: &NetworkProfile) -> bool {
    profile
        .slots
        .iter()
        .any(|slot| vnic.oper_nw_templ_name.contains(slot.template))
}

/// Converges servers to a declared network profile
pub struct Reconciler<'a> {
    session: &'a dyn UcsApi,
    retained: RetentionPredicate,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler with the default substring retention rule
    pub fn new(session: &'a dyn UcsApi) -> Self {
        Self {
            session,
            retained: template_substring_retained,
        }
    }

    /// Replace the retention rule (e.g., with an exact match)
    pub fn with_retention(session: &'a dyn UcsApi, retained: RetentionPredicate) -> Self {
        Self { session, retained }
    }

    /// Converge one server's vNIC set to the profile
    ///
    /// Stops at the first failed intent; already-applied adds are not rolled
    /// back, and removal only runs once every slot has been declared.
    pub async fn reconcile(
        &self,
        server: &LsServer,
        profile: &NetworkProfile,
    ) -> Result<(), AppError> {
        info!("Reconciling server {} to profile {}", server.name, profile.name);

        // Converge-up: declare every slot at its 1-based order index,
        // regardless of current state.
        for (idx, slot) in profile.slots.iter().enumerate() {
            let order = idx as u32 + 1;
            let config = VnicEtherConfig::for_slot(&server.dn, slot.name, slot.template, order);
            info!(
                "Adding interface {} (template {}, order {}) on {}",
                slot.name, slot.template, order, server.dn
            );
            self.session
                .upsert_vnic(&config)
                .await
                .map_err(|e| AppError::ApplyFailed {
                    op: ApplyOp::Add,
                    server: server.name.clone(),
                    vnic: slot.name.to_string(),
                    source: e,
                })?;
        }

        // Converge-down: fresh read so the vNICs declared above are seen and
        // never removed by this pass.
        let vnics = self
            .session
            .get_vnics(&server.dn)
            .await
            .map_err(|e| AppError::ReadFailed {
                what: format!("vNICs of server {}", server.name),
                source: e,
            })?;

        for vnic in &vnics {
            if (self.retained)(vnic, profile) {
                continue;
            }
            info!(
                "Removing interface {} (operational template '{}')",
                vnic.dn, vnic.oper_nw_templ_name
            );
            self.session
                .delete_vnic(&vnic.dn)
                .await
                .map_err(|e| AppError::ApplyFailed {
                    op: ApplyOp::Remove,
                    server: server.name.clone(),
                    vnic: vnic.name.clone(),
                    source: e,
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles;
    use ucsm_client::{MockOp, MockUcsSession};

    const SERVER_DN: &str = "org-root/ls-POD-2-blade-1";

    fn pod_server() -> LsServer {
        LsServer {
            dn: SERVER_DN.to_string(),
            name: "POD-2-blade-1".to_string(),
            server_type: "instance".to_string(),
            assoc_state: Some("associated".to_string()),
        }
    }

    fn existing_vnic(name: &str, oper_template: &str) -> VnicEther {
        VnicEther {
            dn: format!("{SERVER_DN}/ether-{name}"),
            name: name.to_string(),
            addr: "00:25:B5:00:00:01".to_string(),
            order: "1".to_string(),
            switch_id: "A-B".to_string(),
            nw_templ_name: oper_template.to_string(),
            oper_nw_templ_name: oper_template.to_string(),
            mtu: "1500".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reconcile_converges_to_profile_slots_and_order() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(pod_server());
        let profile = profiles::lookup("FOREMAN").unwrap();

        Reconciler::new(&mock)
            .reconcile(&pod_server(), profile)
            .await
            .unwrap();

        assert_eq!(
            mock.vnic_names(SERVER_DN),
            vec!["eth0", "eth1", "eth2", "eth3"]
        );
        for (idx, slot) in profile.slots.iter().enumerate() {
            let vnic = mock
                .vnic(&format!("{SERVER_DN}/ether-{}", slot.name))
                .unwrap();
            assert_eq!(vnic.order, (idx + 1).to_string());
            assert_eq!(vnic.nw_templ_name, slot.template);
            assert_eq!(vnic.mtu, "1500");
        }
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(pod_server());
        let profile = profiles::lookup("FUEL").unwrap();
        let reconciler = Reconciler::new(&mock);

        reconciler.reconcile(&pod_server(), profile).await.unwrap();
        let after_first = mock.vnic_names(SERVER_DN);

        reconciler.reconcile(&pod_server(), profile).await.unwrap();
        assert_eq!(mock.vnic_names(SERVER_DN), after_first);
        assert_eq!(after_first, vec!["eth0", "eth1"]);
    }

    #[tokio::test]
    async fn test_converge_down_reads_after_all_adds() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(pod_server());
        let profile = profiles::lookup("FUEL").unwrap();

        Reconciler::new(&mock)
            .reconcile(&pod_server(), profile)
            .await
            .unwrap();

        let ops = mock.operations();
        let read_pos = ops
            .iter()
            .position(|op| matches!(op, MockOp::ReadVnics(_)))
            .expect("converge-down must read the live vNIC set");
        let last_upsert = ops
            .iter()
            .rposition(|op| matches!(op, MockOp::Upsert(_)))
            .expect("converge-up must have issued adds");
        assert!(
            last_upsert < read_pos,
            "the removal pass must read after every add: {ops:?}"
        );
        // Nothing just added may be removed in the same run.
        assert!(!ops.iter().any(|op| matches!(op, MockOp::Delete(_))));
    }

    #[tokio::test]
    async fn test_drifted_server_converges_and_drops_stale_vnics() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(pod_server());
        mock.add_vnic(existing_vnic("eth0", "legacy-public"));
        mock.add_vnic(existing_vnic("eth2", "old-storage"));
        // The manager resolves the requested template to a derived name that
        // still contains the requested one.
        mock.resolve_template_as("fuel-public", "fuel-public-resolved");

        let profile = profiles::lookup("FUEL").unwrap();
        Reconciler::new(&mock)
            .reconcile(&pod_server(), profile)
            .await
            .unwrap();

        // eth0 re-declared (kept via substring on the resolved name), eth1
        // added, eth2 matched nothing and was removed.
        assert_eq!(mock.vnic_names(SERVER_DN), vec!["eth0", "eth1"]);
        let eth0 = mock.vnic(&format!("{SERVER_DN}/ether-eth0")).unwrap();
        assert_eq!(eth0.oper_nw_templ_name, "fuel-public-resolved");
        assert!(mock
            .operations()
            .contains(&MockOp::Delete(format!("{SERVER_DN}/ether-eth2"))));
    }

    #[tokio::test]
    async fn test_failed_second_add_aborts_without_removal() {
        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(pod_server());
        mock.fail_upsert_on(2);

        let profile = profiles::lookup("FUEL").unwrap();
        let err = Reconciler::new(&mock)
            .reconcile(&pod_server(), profile)
            .await
            .unwrap_err();

        match err {
            AppError::ApplyFailed { op, vnic, server, .. } => {
                assert_eq!(op, ApplyOp::Add);
                assert_eq!(vnic, "eth1");
                assert_eq!(server, "POD-2-blade-1");
            }
            other => panic!("expected ApplyFailed, got {other:?}"),
        }

        // eth0 was applied and stays; eth1 never landed; no read or removal
        // was attempted after the failure.
        assert_eq!(mock.vnic_names(SERVER_DN), vec!["eth0"]);
        let ops = mock.operations();
        assert!(!ops.iter().any(|op| matches!(op, MockOp::ReadVnics(_))));
        assert!(!ops.iter().any(|op| matches!(op, MockOp::Delete(_))));
    }

    #[test]
    fn test_substring_retention_uses_operational_name() {
        let profile = profiles::lookup("FUEL").unwrap();

        let mut vnic = existing_vnic("eth5", "");
        vnic.oper_nw_templ_name = "org-root/lan-conn-templ-fuel-tagged".to_string();
        assert!(template_substring_retained(&vnic, profile));

        vnic.oper_nw_templ_name = "old-storage".to_string();
        // The requested name is ignored by the rule.
        vnic.nw_templ_name = "fuel-public".to_string();
        assert!(!template_substring_retained(&vnic, profile));
    }

    #[tokio::test]
    async fn test_custom_retention_predicate_is_honored() {
        fn keep_everything(_: &VnicEther, _: &NetworkProfile) -> bool {
            true
        }

        let mock = MockUcsSession::new("https://ucsm.test");
        mock.add_server(pod_server());
        mock.add_vnic(existing_vnic("eth7", "completely-unrelated"));

        let profile = profiles::lookup("FUEL").unwrap();
        Reconciler::with_retention(&mock, keep_everything)
            .reconcile(&pod_server(), profile)
            .await
            .unwrap();

        assert_eq!(mock.vnic_names(SERVER_DN), vec!["eth0", "eth1", "eth7"]);
    }
}
