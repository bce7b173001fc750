//! vCenter registration domain types

use serde::{Deserialize, Serialize};

/// A vCenter server registered with the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualCenter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Management endpoint URL of the vCenter server
    pub url: String,

    pub username: String,

    /// Write-only; the server never echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub is_enabled: bool,

    #[serde(default)]
    pub is_connected: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_health_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_version: Option<String>,
}
