//! Entity resolution response

use serde::{Deserialize, Serialize};

use crate::domain::rde::EntityState;

/// Response of the Defined Entity resolve operation
///
/// Carries the validated document and the resulting state; `message` is set
/// when validation against the type schema failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityResolution {
    pub id: String,

    pub state: EntityState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub entity: serde_json::Map<String, serde_json::Value>,
}
