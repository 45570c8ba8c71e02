//! UCS Manager API client
//!
//! Implements the manager's DN-addressed object-model CRUD over HTTP:
//! session login/logout, class resolution, children resolution, and
//! create-or-update / delete of managed objects.

use crate::error::UcsError;
use crate::models::*;
use crate::session_trait::UcsApi;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Authenticated session against one UCS Manager
///
/// Holds the session cookie returned by login; the cookie is attached to
/// every subsequent request and invalidated server-side by [`UcsSession::logout`].
pub struct UcsSession {
    client: Client,
    base_url: String,
    cookie: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    out_cookie: String,
}

impl UcsSession {
    /// Log in to a UCS Manager and return an authenticated session
    ///
    /// # Arguments
    /// * `base_url` - manager base URL (e.g., "https://10.0.0.10")
    /// * `username` - account username
    /// * `password` - account password
    pub async fn login(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, UcsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(UcsError::Http)?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}/api/aaa/login", base_url);
        debug!("Logging in to UCS Manager at {}", base_url);

        let body = serde_json::json!({
            "inName": username,
            "inPassword": password,
        });

        let response = client
            .post(&url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(UcsError::Http)?;

        let status = response.status();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Authentication(format!(
                "Login rejected for user {}: {} - {}",
                username, status, body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Api(format!(
                "Login failed: {} - {}",
                status, body
            )));
        }

        let login: LoginResponse = response.json().await.map_err(UcsError::Http)?;
        debug!("Login succeeded, session cookie acquired");

        Ok(Self {
            client,
            base_url,
            cookie: login.out_cookie,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log out, invalidating the session cookie server-side
    pub async fn logout(&self) -> Result<(), UcsError> {
        let url = format!("{}/api/aaa/logout", self.base_url);
        debug!("Logging out of UCS Manager");

        let response = self.client
            .post(&url)
            .header("ucsmcookie", &self.cookie)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Api(format!(
                "Logout failed: {} - {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Resolve all instances of a managed-object class
    async fn resolve_class<T: for<'de> Deserialize<'de>>(
        &self,
        class_id: &str,
    ) -> Result<Vec<T>, UcsError> {
        let url = format!("{}/api/class/{}", self.base_url, class_id);
        debug!("Resolving class {}", class_id);

        let response = self.client
            .get(&url)
            .header("ucsmcookie", &self.cookie)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Api(format!(
                "Failed to resolve class {}: {} - {}",
                class_id, status, body
            )));
        }

        let response_text = response.text().await?;
        let resolved: ResolveResponse<T> = serde_json::from_str(&response_text).map_err(|e| {
            UcsError::Api(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ))
        })?;
        Ok(resolved.out_configs)
    }

    /// Resolve children of a DN, filtered to one class
    async fn resolve_children<T: for<'de> Deserialize<'de>>(
        &self,
        dn: &str,
        class_id: &str,
    ) -> Result<Vec<T>, UcsError> {
        let url = format!("{}/api/mo/{}/children?classId={}", self.base_url, dn, class_id);
        debug!("Resolving {} children of {}", class_id, dn);

        let response = self.client
            .get(&url)
            .header("ucsmcookie", &self.cookie)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsError::Http)?;

        let status = response.status();
        if status == 404 {
            return Err(UcsError::NotFound(format!("Managed object {} not found", dn)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Api(format!(
                "Failed to resolve children of {}: {} - {}",
                dn, status, body
            )));
        }

        let response_text = response.text().await?;
        let resolved: ResolveResponse<T> = serde_json::from_str(&response_text).map_err(|e| {
            UcsError::Api(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ))
        })?;
        Ok(resolved.out_configs)
    }

    /// List all service-profile servers known to the manager
    ///
    /// Returns every `lsServer` node, templates included; the caller filters
    /// to the nodes it cares about.
    pub async fn list_servers(&self) -> Result<Vec<LsServer>, UcsError> {
        self.resolve_class("lsServer").await
    }

    /// List the vNICs currently configured on a server
    pub async fn get_vnics(&self, server_dn: &str) -> Result<Vec<VnicEther>, UcsError> {
        self.resolve_children(server_dn, "vnicEther").await
    }

    /// List the VLAN bindings of a vNIC
    pub async fn get_vnic_ifs(&self, vnic_dn: &str) -> Result<Vec<VnicEtherIf>, UcsError> {
        self.resolve_children(vnic_dn, "vnicEtherIf").await
    }

    /// Declare desired state for a vNIC (create-or-update by DN)
    ///
    /// The manager treats re-declaration of an existing DN as a modify, so
    /// this call is safe to issue unconditionally.
    pub async fn upsert_vnic(&self, config: &VnicEtherConfig) -> Result<(), UcsError> {
        let url = format!("{}/api/mo", self.base_url);
        debug!("Upserting vNIC {} (template {})", config.dn, config.nw_templ_name);

        let response = self.client
            .post(&url)
            .header("ucsmcookie", &self.cookie)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(config)
            .send()
            .await
            .map_err(UcsError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Api(format!(
                "Failed to upsert vNIC {}: {} - {}",
                config.dn, status, body
            )));
        }

        Ok(())
    }

    /// Remove the vNIC at a DN
    pub async fn delete_vnic(&self, vnic_dn: &str) -> Result<(), UcsError> {
        let url = format!("{}/api/mo/{}", self.base_url, vnic_dn);
        debug!("Deleting vNIC {}", vnic_dn);

        let response = self.client
            .delete(&url)
            .header("ucsmcookie", &self.cookie)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UcsError::Http)?;

        let status = response.status();
        if status == 404 {
            return Err(UcsError::NotFound(format!("vNIC {} not found", vnic_dn)));
        }

        if !status.is_success() && status != 204 {
            let body = response.text().await.unwrap_or_default();
            return Err(UcsError::Api(format!(
                "Failed to delete vNIC {}: {} - {}",
                vnic_dn, status, body
            )));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl UcsApi for UcsSession {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn list_servers(&self) -> Result<Vec<LsServer>, UcsError> {
        self.list_servers().await
    }

    async fn get_vnics(&self, server_dn: &str) -> Result<Vec<VnicEther>, UcsError> {
        self.get_vnics(server_dn).await
    }

    async fn get_vnic_ifs(&self, vnic_dn: &str) -> Result<Vec<VnicEtherIf>, UcsError> {
        self.get_vnic_ifs(vnic_dn).await
    }

    async fn upsert_vnic(&self, config: &VnicEtherConfig) -> Result<(), UcsError> {
        self.upsert_vnic(config).await
    }

    async fn delete_vnic(&self, vnic_dn: &str) -> Result<(), UcsError> {
        self.delete_vnic(vnic_dn).await
    }

    async fn logout(&self) -> Result<(), UcsError> {
        self.logout().await
    }
}
