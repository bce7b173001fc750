//! Runtime Defined Entity instance operations
//!
//! Instances are created through their type and follow a two-phase
//! lifecycle: the server parks new entities in `PRE_CREATED` until an
//! explicit resolve call validates them against the type schema, and it
//! rejects deletion while an entity is unresolved. Both transitions are
//! enforced server-side; this client only issues the calls.

use reqwest::Method;

use vcd_core::domain::rde::{self, EntityState};
use vcd_core::dto::resolution::EntityResolution;

use crate::VcdClient;
use crate::crud::{self, CrudConfig, OuterEntity};
use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};
use crate::rde_type::DefinedEntityType;

const LABEL_RDE: &str = "Runtime Defined Entity";

/// A Runtime Defined Entity instance paired with the client that fetched it
#[derive(Debug, Clone)]
pub struct DefinedEntity {
    /// The underlying API record; zeroed after a successful delete
    pub record: rde::DefinedEntity,
    client: VcdClient,
}

impl OuterEntity for DefinedEntity {
    type Inner = rde::DefinedEntity;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self {
        Self {
            record: inner,
            client: client.clone(),
        }
    }
}

impl VcdClient {
    /// Retrieve all Runtime Defined Entities
    ///
    /// Query parameters can be supplied to perform additional filtering.
    /// Only System administrators can retrieve RDEs.
    pub async fn get_all_rdes(&self, query: &[(&str, &str)]) -> Result<Vec<DefinedEntity>> {
        self.require_sys_admin("getting Runtime Defined Entities")?;
        let cfg = CrudConfig::new(LABEL_RDE, Endpoint::Entities).with_query(query);
        crud::get_all_outer_entities(self, cfg).await
    }

    /// Get a Runtime Defined Entity by its ID
    ///
    /// Only System administrators can retrieve RDEs.
    pub async fn get_rde_by_id(&self, id: &str) -> Result<DefinedEntity> {
        self.require_sys_admin("getting Runtime Defined Entities")?;
        let params: [&str; 1] = [id];
        let cfg = CrudConfig::new(LABEL_RDE, Endpoint::Entities).with_params(&params);
        crud::get_outer_entity(self, cfg).await
    }
}

impl DefinedEntityType {
    /// Create an instance of this RDE type
    ///
    /// The server answers with the entity in `PRE_CREATED` state; call
    /// [`DefinedEntity::resolve`] to validate it before it can be deleted.
    /// Only System administrators can create RDEs.
    pub async fn create_rde(&self, config: &rde::DefinedEntity) -> Result<DefinedEntity> {
        self.client
            .require_sys_admin("creating Runtime Defined Entities")?;
        let type_id = self.id()?;

        let params: [&str; 1] = [&type_id];
        let cfg = CrudConfig::new(LABEL_RDE, Endpoint::EntityTypes).with_params(&params);
        crud::create_outer_entity(&self.client, cfg, config).await
    }

    /// Retrieve all instances of this RDE type
    ///
    /// Query parameters can be supplied to perform additional filtering.
    pub async fn get_all_rdes(&self, query: &[(&str, &str)]) -> Result<Vec<DefinedEntity>> {
        let type_id = self.id()?;
        let filter = format!("entityType=={type_id}");

        let mut combined: Vec<(&str, &str)> = vec![("filter", filter.as_str())];
        combined.extend_from_slice(query);

        self.client.get_all_rdes(&combined).await
    }

    /// Get a Runtime Defined Entity by its ID
    pub async fn get_rde_by_id(&self, id: &str) -> Result<DefinedEntity> {
        self.client.get_rde_by_id(id).await
    }
}

impl DefinedEntity {
    fn id(&self) -> Result<String> {
        self.record
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidRequest(
                    "id of the receiver Runtime Defined Entity is empty".to_string(),
                )
            })
    }

    /// Resolve the receiver entity, validating it against its type schema
    ///
    /// On success the local record reflects the server's `RESOLVED` state and
    /// the validated document. A validation rejection surfaces as
    /// [`ClientError::ResolutionFailed`] with the server's message.
    pub async fn resolve(&mut self) -> Result<()> {
        self.client
            .require_sys_admin("resolving Runtime Defined Entities")?;
        let id = self.id()?;

        let version = self.client.highest_elevated_version(Endpoint::EntityResolve)?;
        let url = self.client.build_endpoint(Endpoint::EntityResolve, &[&id])?;
        let response = self
            .client
            .request(Method::POST, &url, version, &[])
            .send()
            .await?;
        let resolution: EntityResolution = self.client.handle_response(response, LABEL_RDE).await?;

        if resolution.state == EntityState::ResolutionError {
            return Err(ClientError::ResolutionFailed(
                resolution
                    .message
                    .unwrap_or_else(|| format!("entity {id} failed schema validation")),
            ));
        }

        self.record.state = Some(resolution.state);
        self.record.entity = resolution.entity;
        Ok(())
    }

    /// Update the receiver Runtime Defined Entity with the values given by
    /// the input
    ///
    /// Only System administrators can update RDEs.
    pub async fn update(&mut self, config: rde::DefinedEntity) -> Result<()> {
        self.client
            .require_sys_admin("updating Runtime Defined Entities")?;
        let id = self.id()?;

        let mut config = config;
        config.id = Some(id.clone());

        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_RDE, Endpoint::Entities).with_params(&params);
        self.record = crud::update_inner_entity(&self.client, &cfg, &config).await?;
        Ok(())
    }

    /// Delete the receiver Runtime Defined Entity
    ///
    /// The server rejects deletion of unresolved entities; the rejection is
    /// surfaced verbatim. The local record is reset to its zero value on
    /// success. Only System administrators can delete RDEs.
    pub async fn delete(&mut self) -> Result<()> {
        self.client
            .require_sys_admin("deleting Runtime Defined Entities")?;
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_RDE, Endpoint::Entities).with_params(&params);
        crud::delete_entity_by_id(&self.client, cfg).await?;

        self.record = rde::DefinedEntity::default();
        Ok(())
    }
}
