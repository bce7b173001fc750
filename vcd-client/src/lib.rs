//! Cloud Director Client
//!
//! A typed, async HTTP client for the VMware Cloud Director OpenAPI.
//!
//! Resource wrappers (RDE interfaces, RDE types, Defined Entities, Content
//! Libraries, vCenter registrations) all funnel through one generic CRUD
//! layer that handles endpoint templating, API version negotiation,
//! pagination, and error mapping.
//!
//! # Example
//!
//! ```no_run
//! use vcd_client::VcdClient;
//! use vcd_core::domain::rde::DefinedEntityType;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = VcdClient::new("https://vcd.example.com")
//!         .with_token("bearer-token")
//!         .sys_admin(true);
//!
//!     let rde_type = client
//!         .create_rde_type(&DefinedEntityType {
//!             name: "cluster".to_string(),
//!             nss: "k8s".to_string(),
//!             version: "1.0.0".to_string(),
//!             vendor: "acme".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("Created RDE type {:?}", rde_type.record.id);
//!     Ok(())
//! }
//! ```

mod content_library;
mod crud;
mod endpoint;
pub mod error;
mod rde;
mod rde_interface;
mod rde_type;
mod task;
mod vcenter;

// Re-export commonly used types
pub use content_library::ContentLibrary;
pub use endpoint::{ApiVersion, DEFAULT_API_VERSIONS, Endpoint};
pub use error::{ClientError, Result};
pub use rde::DefinedEntity;
pub use rde_interface::DefinedInterface;
pub use rde_type::DefinedEntityType;
pub use task::Task;
pub use vcenter::VCenter;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use vcd_core::dto::error::ApiErrorBody;

/// HTTP client for the Cloud Director OpenAPI
///
/// Holds the session facts the wrappers consult before issuing calls: the
/// bearer token, the API versions the session may use, and the privilege and
/// deployment flags. Cloning is cheap; wrappers keep their own clone so they
/// can re-issue requests (update, delete, refresh) on their own.
#[derive(Debug, Clone)]
pub struct VcdClient {
    /// Base URL of the installation (e.g., "https://vcd.example.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token applied to every request, when present
    token: Option<String>,
    /// API versions the session is permitted to use
    api_versions: Vec<ApiVersion>,
    /// Whether the session holds System administrator rights
    is_sys_admin: bool,
    /// Whether the installation is a Tenant Manager (VCF) deployment
    is_tm: bool,
}

impl VcdClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the installation (e.g., "https://vcd.example.com")
    ///
    /// # Example
    /// ```
    /// use vcd_client::VcdClient;
    ///
    /// let client = VcdClient::new("https://vcd.example.com");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use vcd_client::VcdClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = VcdClient::with_client("https://vcd.example.com", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
            api_versions: DEFAULT_API_VERSIONS.to_vec(),
            is_sys_admin: false,
            is_tm: false,
        }
    }

    /// Set the bearer token applied to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the set of API versions the session may use
    ///
    /// Defaults to every version this client speaks; sessions against older
    /// installations should narrow it to what the server advertised.
    pub fn with_api_versions(mut self, versions: impl Into<Vec<ApiVersion>>) -> Self {
        self.api_versions = versions.into();
        self
    }

    /// Mark the session as holding System administrator rights
    pub fn sys_admin(mut self, is_sys_admin: bool) -> Self {
        self.is_sys_admin = is_sys_admin;
        self
    }

    /// Mark the installation as a Tenant Manager (VCF) deployment
    pub fn tenant_manager(mut self, is_tm: bool) -> Self {
        self.is_tm = is_tm;
        self
    }

    /// Get the base URL of the installation
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the session holds System administrator rights
    pub fn is_sys_admin(&self) -> bool {
        self.is_sys_admin
    }

    /// Whether the installation is a Tenant Manager deployment
    pub fn is_tm(&self) -> bool {
        self.is_tm
    }

    // =============================================================================
    // Request Plumbing
    // =============================================================================

    /// Start a request carrying the negotiated version and session token
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        version: ApiVersion,
        query: &[(&str, &str)],
    ) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, format!("application/json;version={version}"));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        builder
    }

    pub(crate) fn highest_elevated_version(&self, endpoint: Endpoint) -> Result<ApiVersion> {
        endpoint::highest_elevated_version(&self.api_versions, endpoint)
    }

    pub(crate) fn build_endpoint(&self, endpoint: Endpoint, params: &[&str]) -> Result<String> {
        endpoint::build_endpoint(&self.base_url, endpoint, params)
    }

    /// URL under the legacy (pre-OpenAPI) root, e.g. `{base}/api/admin/...`
    pub(crate) fn legacy_url(&self, segments: &[&str]) -> String {
        format!("{}/api/{}", self.base_url, segments.join("/"))
    }

    /// Reject privileged operations before any network call
    pub(crate) fn require_sys_admin(&self, action: &str) -> Result<()> {
        if self.is_sys_admin {
            Ok(())
        } else {
            Err(ClientError::Unauthorized(format!(
                "{action} requires System administrator"
            )))
        }
    }

    /// Reject Tenant-Manager-only operations on other deployments
    pub(crate) fn require_tm(&self, action: &str) -> Result<()> {
        if self.is_tm {
            Ok(())
        } else {
            Err(ClientError::Unauthorized(format!(
                "{action} requires a Tenant Manager deployment"
            )))
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful. HTTP 404 maps
    /// to the not-found sentinel, labeled with the entity kind.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        entity_label: &str,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from_response(status, response, entity_label).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {e}")))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    pub(crate) async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        entity_label: &str,
    ) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from_response(status, response, entity_label).await);
        }

        Ok(())
    }

    async fn error_from_response(
        status: StatusCode,
        response: reqwest::Response,
        entity_label: &str,
    ) -> ClientError {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // Prefer the structured error body's message over the raw payload
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        let message = if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };

        if status == StatusCode::NOT_FOUND {
            ClientError::EntityNotFound(format!("{entity_label}: {message}"))
        } else {
            ClientError::api_error(status.as_u16(), message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = VcdClient::new("https://vcd.example.com");
        assert_eq!(client.base_url(), "https://vcd.example.com");
        assert!(!client.is_sys_admin());
        assert!(!client.is_tm());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = VcdClient::new("https://vcd.example.com/");
        assert_eq!(client.base_url(), "https://vcd.example.com");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = VcdClient::with_client("https://vcd.example.com", http_client);
        assert_eq!(client.base_url(), "https://vcd.example.com");
    }

    #[test]
    fn test_session_flags() {
        let client = VcdClient::new("https://vcd.example.com")
            .sys_admin(true)
            .tenant_manager(true);
        assert!(client.require_sys_admin("testing").is_ok());
        assert!(client.require_tm("testing").is_ok());

        let restricted = VcdClient::new("https://vcd.example.com");
        let err = restricted.require_sys_admin("creating things").unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));
    }

    #[test]
    fn test_legacy_url() {
        let client = VcdClient::new("https://vcd.example.com");
        assert_eq!(
            client.legacy_url(&["admin", "extension", "vimServer"]),
            "https://vcd.example.com/api/admin/extension/vimServer"
        );
    }
}
