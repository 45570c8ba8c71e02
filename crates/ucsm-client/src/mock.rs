//! Mock UcsSession for unit testing
//!
//! Provides an in-memory implementation of [`UcsApi`] so reconciliation code
//! can be tested without a reachable UCS Manager. The mock stores managed
//! objects keyed by DN, records every operation in order, and can be
//! configured to fail the Nth mutation to exercise partial-failure paths.
//!
//! Template binding is modelled with a resolution map: when a vNIC is
//! upserted, its operational template name is looked up from the requested
//! name (defaulting to the requested name itself), mimicking the manager
//! filling in `operNwTemplName` asynchronously.

use crate::error::UcsError;
use crate::models::*;
use crate::session_trait::UcsApi;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded mock operation, in issue order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOp {
    ListServers,
    ReadVnics(String),
    ReadVnicIfs(String),
    Upsert(String),
    Delete(String),
}

/// Mock UCS session for testing
#[derive(Clone)]
pub struct MockUcsSession {
    base_url: String,
    servers: Arc<Mutex<HashMap<String, LsServer>>>,
    // vNICs keyed by their full DN
    vnics: Arc<Mutex<HashMap<String, VnicEther>>>,
    vnic_ifs: Arc<Mutex<HashMap<String, Vec<VnicEtherIf>>>>,
    // requested template name -> operational template name
    template_resolution: Arc<Mutex<HashMap<String, String>>>,
    ops: Arc<Mutex<Vec<MockOp>>>,
    // fail the Nth upsert (1-based); None disables injection
    fail_upsert_on: Arc<Mutex<Option<u32>>>,
    upsert_count: Arc<Mutex<u32>>,
}

impl MockUcsSession {
    /// Create a new mock session
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            servers: Arc::new(Mutex::new(HashMap::new())),
            vnics: Arc::new(Mutex::new(HashMap::new())),
            vnic_ifs: Arc::new(Mutex::new(HashMap::new())),
            template_resolution: Arc::new(Mutex::new(HashMap::new())),
            ops: Arc::new(Mutex::new(Vec::new())),
            fail_upsert_on: Arc::new(Mutex::new(None)),
            upsert_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a server to the mock store (for test setup)
    pub fn add_server(&self, server: LsServer) {
        self.servers.lock().unwrap().insert(server.dn.clone(), server);
    }

    /// Add a pre-existing vNIC to the mock store (for test setup)
    pub fn add_vnic(&self, vnic: VnicEther) {
        self.vnics.lock().unwrap().insert(vnic.dn.clone(), vnic);
    }

    /// Set the VLAN bindings returned for a vNIC DN (for test setup)
    pub fn set_vnic_ifs(&self, vnic_dn: impl Into<String>, ifs: Vec<VnicEtherIf>) {
        self.vnic_ifs.lock().unwrap().insert(vnic_dn.into(), ifs);
    }

    /// Map a requested template name to the operational name the manager
    /// would resolve it to (for test setup)
    pub fn resolve_template_as(&self, requested: impl Into<String>, operational: impl Into<String>) {
        self.template_resolution
            .lock()
            .unwrap()
            .insert(requested.into(), operational.into());
    }

    /// Fail the Nth upsert (1-based) with an API error
    pub fn fail_upsert_on(&self, nth: u32) {
        *self.fail_upsert_on.lock().unwrap() = Some(nth);
    }

    /// Snapshot of all operations issued so far, in order
    pub fn operations(&self) -> Vec<MockOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Names of the vNICs currently present on a server, sorted
    pub fn vnic_names(&self, server_dn: &str) -> Vec<String> {
        let prefix = format!("{server_dn}/ether-");
        let mut names: Vec<String> = self
            .vnics
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.dn.starts_with(&prefix))
            .map(|v| v.name.clone())
            .collect();
        names.sort();
        names
    }

    /// The vNIC stored at a DN, if present
    pub fn vnic(&self, dn: &str) -> Option<VnicEther> {
        self.vnics.lock().unwrap().get(dn).cloned()
    }

    fn record(&self, op: MockOp) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait::async_trait]
impl UcsApi for MockUcsSession {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_servers(&self) -> Result<Vec<LsServer>, UcsError> {
        self.record(MockOp::ListServers);
        let mut servers: Vec<LsServer> = self.servers.lock().unwrap().values().cloned().collect();
        servers.sort_by(|a, b| a.dn.cmp(&b.dn));
        Ok(servers)
    }

    async fn get_vnics(&self, server_dn: &str) -> Result<Vec<VnicEther>, UcsError> {
        self.record(MockOp::ReadVnics(server_dn.to_string()));
        if !self.servers.lock().unwrap().contains_key(server_dn) {
            return Err(UcsError::NotFound(format!(
                "Managed object {} not found",
                server_dn
            )));
        }
        let prefix = format!("{server_dn}/ether-");
        let mut vnics: Vec<VnicEther> = self
            .vnics
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.dn.starts_with(&prefix))
            .cloned()
            .collect();
        vnics.sort_by(|a, b| a.dn.cmp(&b.dn));
        Ok(vnics)
    }

    async fn get_vnic_ifs(&self, vnic_dn: &str) -> Result<Vec<VnicEtherIf>, UcsError> {
        self.record(MockOp::ReadVnicIfs(vnic_dn.to_string()));
        Ok(self
            .vnic_ifs
            .lock()
            .unwrap()
            .get(vnic_dn)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_vnic(&self, config: &VnicEtherConfig) -> Result<(), UcsError> {
        self.record(MockOp::Upsert(config.dn.clone()));

        let count = {
            let mut count = self.upsert_count.lock().unwrap();
            *count += 1;
            *count
        };
        if let Some(nth) = *self.fail_upsert_on.lock().unwrap() {
            if count == nth {
                return Err(UcsError::Api(format!(
                    "Failed to upsert vNIC {}: 503 - injected failure",
                    config.dn
                )));
            }
        }

        let oper = self
            .template_resolution
            .lock()
            .unwrap()
            .get(&config.nw_templ_name)
            .cloned()
            .unwrap_or_else(|| config.nw_templ_name.clone());

        self.vnics.lock().unwrap().insert(
            config.dn.clone(),
            VnicEther {
                dn: config.dn.clone(),
                name: config.name.clone(),
                addr: "derived".to_string(),
                order: config.order.clone(),
                switch_id: config.switch_id.clone(),
                nw_templ_name: config.nw_templ_name.clone(),
                oper_nw_templ_name: oper,
                mtu: config.mtu.clone(),
            },
        );
        Ok(())
    }

    async fn delete_vnic(&self, vnic_dn: &str) -> Result<(), UcsError> {
        self.record(MockOp::Delete(vnic_dn.to_string()));
        if self.vnics.lock().unwrap().remove(vnic_dn).is_none() {
            return Err(UcsError::NotFound(format!("vNIC {} not found", vnic_dn)));
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), UcsError> {
        Ok(())
    }
}
