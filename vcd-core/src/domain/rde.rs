//! Runtime Defined Entity domain types
//!
//! Records shared between the client (requests) and the server (responses).
//! An RDE Interface groups behaviors under a `vendor.nss:version` key, an RDE
//! Type adds a JSON schema governing instances, and a Defined Entity is one
//! typed JSON document instance.

use serde::{Deserialize, Serialize};

/// RDE interface record, identified by `urn:vcloud:interface:{vendor}.{nss}:{version}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// Namespace segment of the interface key
    pub nss: String,

    pub version: String,

    pub vendor: String,

    /// Interfaces provided by the platform itself cannot be modified
    #[serde(default, rename = "readonly")]
    pub read_only: bool,
}

/// RDE type record, identified by `urn:vcloud:type:{vendor}.{nss}:{version}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedEntityType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// Namespace segment of the type key
    pub nss: String,

    pub version: String,

    pub vendor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URNs of the RDE interfaces this type implements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,

    /// JSON schema that instances of this type must conform to
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub schema: serde_json::Map<String, serde_json::Value>,

    #[serde(default, rename = "readonly")]
    pub read_only: bool,
}

/// A Runtime Defined Entity instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URN of the RDE type governing this instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    pub name: String,

    /// The typed JSON document itself
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub entity: serde_json::Map<String, serde_json::Value>,

    /// Server-side lifecycle state; absent in creation payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<super::common::EntityReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<super::common::EntityReference>,
}

/// Lifecycle state of a Defined Entity
///
/// Instances start in `PreCreated` and must be resolved (validated against
/// the type schema) before the server accepts a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityState {
    PreCreated,
    Resolved,
    ResolutionError,
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityState::PreCreated => write!(f, "PRE_CREATED"),
            EntityState::Resolved => write!(f, "RESOLVED"),
            EntityState::ResolutionError => write!(f, "RESOLUTION_ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_state_uses_screaming_snake_case_on_the_wire() {
        let state: EntityState = serde_json::from_str("\"PRE_CREATED\"").unwrap();
        assert_eq!(state, EntityState::PreCreated);
        assert_eq!(
            serde_json::to_string(&EntityState::Resolved).unwrap(),
            "\"RESOLVED\""
        );
    }

    #[test]
    fn creation_payload_omits_server_assigned_fields() {
        let payload = DefinedEntityType {
            name: "cluster".to_string(),
            nss: "k8s".to_string(),
            version: "1.0.0".to_string(),
            vendor: "acme".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("schema").is_none());
        assert_eq!(json["nss"], "k8s");
        assert_eq!(json["readonly"], false);
    }

    #[test]
    fn defined_entity_round_trips_state_and_document() {
        let raw = serde_json::json!({
            "id": "urn:vcloud:entity:acme:k8s:1234",
            "entityType": "urn:vcloud:type:acme.k8s:1.0.0",
            "name": "my-cluster",
            "entity": {"spec": {"nodes": 3}},
            "state": "RESOLVED"
        });

        let entity: DefinedEntity = serde_json::from_value(raw).unwrap();
        assert_eq!(entity.state, Some(EntityState::Resolved));
        assert_eq!(entity.entity["spec"]["nodes"], 3);
    }
}
