//! Runtime Defined Entity interface operations

use vcd_core::domain::rde;

use crate::VcdClient;
use crate::crud::{self, CrudConfig, OuterEntity, one_or_error};
use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};

const LABEL_DEFINED_INTERFACE: &str = "Defined Interface";

/// An RDE interface paired with the client that fetched it
#[derive(Debug, Clone)]
pub struct DefinedInterface {
    /// The underlying API record; zeroed after a successful delete
    pub record: rde::DefinedInterface,
    client: VcdClient,
}

impl OuterEntity for DefinedInterface {
    type Inner = rde::DefinedInterface;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self {
        Self {
            record: inner,
            client: client.clone(),
        }
    }
}

impl VcdClient {
    /// Create an RDE interface
    ///
    /// Only System administrators can create RDE interfaces.
    pub async fn create_defined_interface(
        &self,
        config: &rde::DefinedInterface,
    ) -> Result<DefinedInterface> {
        self.require_sys_admin("creating Defined Interfaces")?;
        let cfg = CrudConfig::new(LABEL_DEFINED_INTERFACE, Endpoint::Interfaces);
        crud::create_outer_entity(self, cfg, config).await
    }

    /// Retrieve all RDE interfaces
    ///
    /// Query parameters can be supplied to perform additional filtering.
    pub async fn get_all_defined_interfaces(
        &self,
        query: &[(&str, &str)],
    ) -> Result<Vec<DefinedInterface>> {
        let cfg = CrudConfig::new(LABEL_DEFINED_INTERFACE, Endpoint::Interfaces).with_query(query);
        crud::get_all_outer_entities(self, cfg).await
    }

    /// Get an RDE interface by its unique combination of vendor, namespace
    /// and version
    pub async fn get_defined_interface(
        &self,
        vendor: &str,
        nss: &str,
        version: &str,
    ) -> Result<DefinedInterface> {
        let filter = format!("vendor=={vendor};nss=={nss};version=={version}");
        let query = [("filter", filter.as_str())];
        let interfaces = self.get_all_defined_interfaces(&query).await?;

        one_or_error(
            "key",
            &format!("{vendor}.{nss}:{version}"),
            LABEL_DEFINED_INTERFACE,
            interfaces,
        )
    }

    /// Get an RDE interface by its ID
    pub async fn get_defined_interface_by_id(&self, id: &str) -> Result<DefinedInterface> {
        let params: [&str; 1] = [id];
        let cfg =
            CrudConfig::new(LABEL_DEFINED_INTERFACE, Endpoint::Interfaces).with_params(&params);
        crud::get_outer_entity(self, cfg).await
    }
}

impl DefinedInterface {
    fn id(&self) -> Result<String> {
        self.record
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidRequest(
                    "id of the receiver Defined Interface is empty".to_string(),
                )
            })
    }

    /// Update the receiver RDE interface with the values given by the input
    ///
    /// The server only honors the name field; key fields (vendor, nss,
    /// version) are immutable once created.
    pub async fn update(&mut self, config: rde::DefinedInterface) -> Result<()> {
        self.client.require_sys_admin("updating Defined Interfaces")?;
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg =
            CrudConfig::new(LABEL_DEFINED_INTERFACE, Endpoint::Interfaces).with_params(&params);
        self.record = crud::update_inner_entity(&self.client, &cfg, &config).await?;
        Ok(())
    }

    /// Delete the receiver RDE interface
    ///
    /// The local record is reset to its zero value on success.
    pub async fn delete(&mut self) -> Result<()> {
        self.client.require_sys_admin("deleting Defined Interfaces")?;
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg =
            CrudConfig::new(LABEL_DEFINED_INTERFACE, Endpoint::Interfaces).with_params(&params);
        crud::delete_entity_by_id(&self.client, cfg).await?;

        self.record = rde::DefinedInterface::default();
        Ok(())
    }
}
