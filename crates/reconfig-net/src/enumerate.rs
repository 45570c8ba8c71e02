//! Pod server enumeration
//!
//! Filters the manager's `lsServer` listing down to the concrete blades of
//! the pod this tool manages. The selection criterion is fixed: instance
//! nodes whose DN carries the pod marker.

use crate::error::AppError;
use tracing::debug;
use ucsm_client::{LsServer, UcsApi};

/// DN substring identifying servers that belong to the managed pod
pub const POD_MARKER: &str = "POD-2";

const INSTANCE_TYPE: &str = "instance";

/// List the pod's servers, freshly queried on every call
///
/// Re-queries the manager each time (no caching), so a later call observes
/// objects added or removed since an earlier one. Templates and out-of-pod
/// nodes are silently excluded.
pub async fn pod_servers(session: &dyn UcsApi) -> Result<Vec<LsServer>, AppError> {
    let servers = session.list_servers().await.map_err(|e| AppError::ReadFailed {
        what: "server list".to_string(),
        source: e,
    })?;

    let pod_servers: Vec<LsServer> = servers
        .into_iter()
        .filter(|s| s.server_type == INSTANCE_TYPE && s.dn.contains(POD_MARKER))
        .collect();
    debug!("Enumerated {} servers in pod {}", pod_servers.len(), POD_MARKER);
    Ok(pod_servers)
}
