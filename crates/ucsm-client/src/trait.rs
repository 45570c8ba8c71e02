//! UcsApi trait for mocking
//!
//! Abstracts the authenticated session surface so the reconciliation and
//! reporting code can be unit-tested against an in-memory mock. The concrete
//! [`crate::UcsSession`] implements this trait.

use crate::error::UcsError;
use crate::models::*;

/// Post-login operations against a UCS Manager
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait UcsApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// List all `lsServer` nodes (instances and templates)
    async fn list_servers(&self) -> Result<Vec<LsServer>, UcsError>;

    /// List the `vnicEther` children of a server DN
    async fn get_vnics(&self, server_dn: &str) -> Result<Vec<VnicEther>, UcsError>;

    /// List the `vnicEtherIf` (VLAN binding) children of a vNIC DN
    async fn get_vnic_ifs(&self, vnic_dn: &str) -> Result<Vec<VnicEtherIf>, UcsError>;

    /// Create-or-update a vNIC by DN
    async fn upsert_vnic(&self, config: &VnicEtherConfig) -> Result<(), UcsError>;

    /// Remove the vNIC at a DN
    async fn delete_vnic(&self, vnic_dn: &str) -> Result<(), UcsError>;

    /// Invalidate the session
    async fn logout(&self) -> Result<(), UcsError>;
}
