//! UCS Manager API Client
//!
//! A Rust client library for the UCS Manager object-model API. Provides
//! typed models and methods for the managed objects this tooling touches:
//! service-profile servers, vNICs and their VLAN bindings.
//!
//! # Example
//!
//! ```no_run
//! use ucsm_client::{UcsSession, VnicEtherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Log in and acquire a session cookie
//! let session = UcsSession::login("https://10.0.0.10", "admin", "secret").await?;
//!
//! // Enumerate service-profile servers
//! let servers = session.list_servers().await?;
//!
//! // Declare desired state for a vNIC (create-or-update by DN)
//! let config = VnicEtherConfig::for_slot(&servers[0].dn, "eth0", "fuel-public", 1);
//! session.upsert_vnic(&config).await?;
//!
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Session handling**: login/logout with a manager-issued session cookie
//! - **DN-addressed CRUD**: resolve class instances, resolve children,
//!   upsert and delete managed objects by distinguished name
//! - **Mocking**: `test-util` feature provides [`MockUcsSession`] over the
//!   [`UcsApi`] trait for unit tests

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod session_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::UcsSession;
pub use error::UcsError;
pub use models::*;
pub use session_trait::UcsApi;
#[cfg(feature = "test-util")]
pub use mock::{MockOp, MockUcsSession};
