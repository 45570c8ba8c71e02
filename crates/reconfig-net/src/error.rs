//! Application errors

use std::fmt;
use thiserror::Error;
use ucsm_client::UcsError;

/// Which side of the reconciliation a failed intent belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOp {
    Add,
    Remove,
}

impl fmt::Display for ApplyOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyOp::Add => write!(f, "add"),
            ApplyOp::Remove => write!(f, "remove"),
        }
    }
}

/// Errors surfaced by the CLI during the authenticated phase
#[derive(Debug, Error)]
pub enum AppError {
    /// Login against the manager was rejected or unreachable
    #[error("Login to UCS Manager failed")]
    LoginFailed(#[source] UcsError),

    /// The requested profile name is not registered
    #[error("Unknown network profile '{0}' (available: FUEL, FOREMAN)")]
    UnknownProfile(String),

    /// An add or remove intent was rejected by the manager
    #[error("Failed to {op} vNIC {vnic} on server {server}")]
    ApplyFailed {
        op: ApplyOp,
        server: String,
        vnic: String,
        #[source]
        source: UcsError,
    },

    /// An enumeration or resolve query failed
    #[error("Failed to read {what}")]
    ReadFailed {
        what: String,
        #[source]
        source: UcsError,
    },
}
