//! Runtime Defined Entity type operations

use vcd_core::domain::rde;

use crate::VcdClient;
use crate::crud::{self, CrudConfig, OuterEntity};
use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};

const LABEL_RDE_TYPE: &str = "Runtime Defined Entity type";

/// An RDE type definition paired with the client that fetched it
#[derive(Debug, Clone)]
pub struct DefinedEntityType {
    /// The underlying API record; zeroed after a successful delete
    pub record: rde::DefinedEntityType,
    pub(crate) client: VcdClient,
}

impl OuterEntity for DefinedEntityType {
    type Inner = rde::DefinedEntityType;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self {
        Self {
            record: inner,
            client: client.clone(),
        }
    }
}

impl VcdClient {
    /// Create an RDE type
    ///
    /// Only System administrators can create RDE types.
    pub async fn create_rde_type(
        &self,
        config: &rde::DefinedEntityType,
    ) -> Result<DefinedEntityType> {
        self.require_sys_admin("creating Runtime Defined Entity types")?;
        let cfg = CrudConfig::new(LABEL_RDE_TYPE, Endpoint::EntityTypes);
        crud::create_outer_entity(self, cfg, config).await
    }

    /// Retrieve all RDE types
    ///
    /// Query parameters can be supplied to perform additional filtering.
    /// Only System administrators can retrieve RDE types.
    pub async fn get_all_rde_types(&self, query: &[(&str, &str)]) -> Result<Vec<DefinedEntityType>> {
        self.require_sys_admin("getting Runtime Defined Entity types")?;
        let cfg = CrudConfig::new(LABEL_RDE_TYPE, Endpoint::EntityTypes).with_query(query);
        crud::get_all_outer_entities(self, cfg).await
    }

    /// Get an RDE type by its unique combination of vendor, namespace and
    /// version
    pub async fn get_rde_type(
        &self,
        vendor: &str,
        nss: &str,
        version: &str,
    ) -> Result<DefinedEntityType> {
        let filter = format!("vendor=={vendor};nss=={nss};version=={version}");
        let query = [("filter", filter.as_str())];
        let mut rde_types = self.get_all_rde_types(&query).await?;

        if rde_types.is_empty() {
            return Err(ClientError::EntityNotFound(format!(
                "{LABEL_RDE_TYPE} with vendor {vendor}, nss {nss} and version {version}"
            )));
        }

        if rde_types.len() > 1 {
            return Err(ClientError::MultipleEntitiesFound(format!(
                "found {} {LABEL_RDE_TYPE} entries with vendor {vendor}, nss {nss} and version {version}",
                rde_types.len()
            )));
        }

        Ok(rde_types.remove(0))
    }

    /// Get an RDE type by its ID
    ///
    /// Only System administrators can retrieve RDE types.
    pub async fn get_rde_type_by_id(&self, id: &str) -> Result<DefinedEntityType> {
        self.require_sys_admin("getting Runtime Defined Entity types")?;
        let params: [&str; 1] = [id];
        let cfg = CrudConfig::new(LABEL_RDE_TYPE, Endpoint::EntityTypes).with_params(&params);
        crud::get_outer_entity(self, cfg).await
    }
}

impl DefinedEntityType {
    pub(crate) fn id(&self) -> Result<String> {
        self.record
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidRequest(
                    "id of the receiver Runtime Defined Entity type is empty".to_string(),
                )
            })
    }

    /// Update the receiver RDE type with the values given by the input
    ///
    /// Only System administrators can update RDE types.
    pub async fn update(&mut self, config: rde::DefinedEntityType) -> Result<()> {
        self.client
            .require_sys_admin("updating Runtime Defined Entity types")?;
        let id = self.id()?;

        if config.id.as_deref().is_some_and(|config_id| config_id != id) {
            return Err(ClientError::InvalidRequest(
                "id of the receiver Runtime Defined Entity type and the input id don't match"
                    .to_string(),
            ));
        }

        let mut config = config;
        config.id = Some(id.clone());

        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_RDE_TYPE, Endpoint::EntityTypes).with_params(&params);
        self.record = crud::update_inner_entity(&self.client, &cfg, &config).await?;
        Ok(())
    }

    /// Delete the receiver RDE type
    ///
    /// The local record is reset to its zero value on success. Only System
    /// administrators can delete RDE types.
    pub async fn delete(&mut self) -> Result<()> {
        self.client
            .require_sys_admin("deleting Runtime Defined Entity types")?;
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_RDE_TYPE, Endpoint::EntityTypes).with_params(&params);
        crud::delete_entity_by_id(&self.client, cfg).await?;

        self.record = rde::DefinedEntityType::default();
        Ok(())
    }
}
