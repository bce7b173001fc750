//! Content Library operations

use vcd_core::domain::content_library;

use crate::VcdClient;
use crate::crud::{self, CrudConfig, OuterEntity, one_or_error};
use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};

const LABEL_CONTENT_LIBRARY: &str = "Content Library";

/// A content library paired with the client that fetched it
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    /// The underlying API record; zeroed after a successful delete
    pub record: content_library::ContentLibrary,
    client: VcdClient,
}

impl OuterEntity for ContentLibrary {
    type Inner = content_library::ContentLibrary;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self {
        Self {
            record: inner,
            client: client.clone(),
        }
    }
}

impl VcdClient {
    /// Create a content library
    ///
    /// Content libraries only exist on Tenant Manager deployments.
    pub async fn create_content_library(
        &self,
        config: &content_library::ContentLibrary,
    ) -> Result<ContentLibrary> {
        self.require_tm("creating Content Libraries")?;
        let cfg = CrudConfig::new(LABEL_CONTENT_LIBRARY, Endpoint::ContentLibraries);
        crud::create_outer_entity(self, cfg, config).await
    }

    /// Retrieve all content libraries
    ///
    /// Query parameters can be supplied to perform additional filtering.
    pub async fn get_all_content_libraries(
        &self,
        query: &[(&str, &str)],
    ) -> Result<Vec<ContentLibrary>> {
        let cfg =
            CrudConfig::new(LABEL_CONTENT_LIBRARY, Endpoint::ContentLibraries).with_query(query);
        crud::get_all_outer_entities(self, cfg).await
    }

    /// Get a content library by name
    pub async fn get_content_library_by_name(&self, name: &str) -> Result<ContentLibrary> {
        if name.is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "{LABEL_CONTENT_LIBRARY} lookup requires name"
            )));
        }

        let filter = format!("name=={name}");
        let query = [("filter", filter.as_str())];
        let libraries = self.get_all_content_libraries(&query).await?;

        let library = one_or_error("name", name, LABEL_CONTENT_LIBRARY, libraries)?;

        // List output trims some fields; re-read by id for the full record
        let id = library.id()?;
        self.get_content_library_by_id(&id).await
    }

    /// Get a content library by its ID
    pub async fn get_content_library_by_id(&self, id: &str) -> Result<ContentLibrary> {
        let params: [&str; 1] = [id];
        let cfg =
            CrudConfig::new(LABEL_CONTENT_LIBRARY, Endpoint::ContentLibraries).with_params(&params);
        crud::get_outer_entity(self, cfg).await
    }
}

impl ContentLibrary {
    fn id(&self) -> Result<String> {
        self.record
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidRequest(
                    "id of the receiver Content Library is empty".to_string(),
                )
            })
    }

    /// Update the receiver content library with the values given by the input
    pub async fn update(&mut self, config: content_library::ContentLibrary) -> Result<()> {
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_CONTENT_LIBRARY, Endpoint::ContentLibraries)
            .with_params(&params);
        self.record = crud::update_inner_entity(&self.client, &cfg, &config).await?;
        Ok(())
    }

    /// Delete the receiver content library
    ///
    /// The local record is reset to its zero value on success.
    pub async fn delete(&mut self) -> Result<()> {
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_CONTENT_LIBRARY, Endpoint::ContentLibraries)
            .with_params(&params);
        crud::delete_entity_by_id(&self.client, cfg).await?;

        self.record = content_library::ContentLibrary::default();
        Ok(())
    }
}
