//! Content Library domain types

use serde::{Deserialize, Serialize};

use super::common::EntityReference;

/// A library of catalog items (templates, media) backed by storage classes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibrary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub library_type: LibraryType,

    /// Whether the library automatically attaches to new storage
    #[serde(default)]
    pub auto_attach: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(default)]
    pub is_shared: bool,

    #[serde(default)]
    pub is_subscribed: bool,

    /// Monotonic version, bumped by the server on every change
    #[serde(default)]
    pub version_number: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_classes: Vec<EntityReference>,
}

/// Ownership scope of a content library
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryType {
    #[default]
    Provider,
    Tenant,
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryType::Provider => write!(f, "PROVIDER"),
            LibraryType::Tenant => write!(f, "TENANT"),
        }
    }
}
