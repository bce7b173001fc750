//! vCenter registration operations

use reqwest::Method;

use vcd_core::domain::task;
use vcd_core::domain::vcenter::VirtualCenter;

use crate::VcdClient;
use crate::crud::{self, CrudConfig, OuterEntity, one_or_error};
use crate::endpoint::{self, Endpoint};
use crate::error::{ClientError, Result};
use crate::task::Task;

const LABEL_VIRTUAL_CENTER: &str = "vCenter Server";

/// A registered vCenter server paired with the client that fetched it
#[derive(Debug, Clone)]
pub struct VCenter {
    /// The underlying API record; zeroed after a successful delete
    pub record: VirtualCenter,
    client: VcdClient,
}

impl OuterEntity for VCenter {
    type Inner = VirtualCenter;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self {
        Self {
            record: inner,
            client: client.clone(),
        }
    }
}

impl VcdClient {
    /// Register a new vCenter connection
    pub async fn create_vcenter(&self, config: &VirtualCenter) -> Result<VCenter> {
        let cfg = CrudConfig::new(LABEL_VIRTUAL_CENTER, Endpoint::VirtualCenters);
        crud::create_outer_entity(self, cfg, config).await
    }

    /// Register a new vCenter connection, returning its task for tracking
    pub async fn create_vcenter_async(&self, config: &VirtualCenter) -> Result<Task> {
        let cfg = CrudConfig::new(LABEL_VIRTUAL_CENTER, Endpoint::VirtualCenters);
        let record: task::Task = crud::create_inner_entity(self, &cfg, config).await?;
        Ok(Task::wrap(self, record))
    }

    /// Retrieve all vCenter servers
    ///
    /// Query parameters can be supplied to perform additional filtering.
    pub async fn get_all_vcenters(&self, query: &[(&str, &str)]) -> Result<Vec<VCenter>> {
        let cfg = CrudConfig::new(LABEL_VIRTUAL_CENTER, Endpoint::VirtualCenters).with_query(query);
        crud::get_all_outer_entities(self, cfg).await
    }

    /// Retrieve a vCenter server by name
    pub async fn get_vcenter_by_name(&self, name: &str) -> Result<VCenter> {
        if name.is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "{LABEL_VIRTUAL_CENTER} lookup requires name"
            )));
        }

        let filter = format!("name=={name}");
        let query = [("filter", filter.as_str())];
        let vcenters = self.get_all_vcenters(&query).await?;

        one_or_error("name", name, LABEL_VIRTUAL_CENTER, vcenters)
    }

    /// Look up an existing vCenter registered with a given URL
    pub async fn get_vcenter_by_url(&self, url: &str) -> Result<VCenter> {
        if url.is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "{LABEL_VIRTUAL_CENTER} lookup requires URL"
            )));
        }

        // API filtering by URL is not supported so relying on local filtering
        let vcenters = self.get_all_vcenters(&[]).await?;
        let matching: Vec<VCenter> = vcenters
            .into_iter()
            .filter(|vcenter| vcenter.record.url == url)
            .collect();

        one_or_error("url", url, LABEL_VIRTUAL_CENTER, matching)
    }

    /// Retrieve a vCenter server by ID
    pub async fn get_vcenter_by_id(&self, id: &str) -> Result<VCenter> {
        let params: [&str; 1] = [id];
        let cfg =
            CrudConfig::new(LABEL_VIRTUAL_CENTER, Endpoint::VirtualCenters).with_params(&params);
        crud::get_outer_entity(self, cfg).await
    }
}

impl VCenter {
    fn id(&self) -> Result<String> {
        self.record
            .vc_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidRequest("id of the receiver vCenter Server is empty".to_string())
            })
    }

    /// Update the receiver vCenter configuration with the values given by
    /// the input
    pub async fn update(&mut self, config: VirtualCenter) -> Result<()> {
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg =
            CrudConfig::new(LABEL_VIRTUAL_CENTER, Endpoint::VirtualCenters).with_params(&params);
        self.record = crud::update_inner_entity(&self.client, &cfg, &config).await?;
        Ok(())
    }

    /// Delete the receiver vCenter configuration
    ///
    /// The local record is reset to its zero value on success.
    pub async fn delete(&mut self) -> Result<()> {
        let id = self.id()?;

        let params: [&str; 1] = [&id];
        let cfg =
            CrudConfig::new(LABEL_VIRTUAL_CENTER, Endpoint::VirtualCenters).with_params(&params);
        crud::delete_entity_by_id(&self.client, cfg).await?;

        self.record = VirtualCenter::default();
        Ok(())
    }

    /// Update shortcut for disabling the vCenter
    pub async fn disable(&mut self) -> Result<()> {
        let mut config = self.record.clone();
        config.is_enabled = false;
        self.update(config).await
    }

    /// Re-fetch the vCenter record from the server
    pub async fn refresh(&mut self) -> Result<()> {
        // By-id and by-name retrievals format the URL field differently;
        // by-name matches what list output reports
        let fetched = self.client.get_vcenter_by_name(&self.record.name).await?;
        self.record = fetched.record;
        Ok(())
    }

    /// URL of the legacy vim server view of this vCenter
    pub fn vim_server_url(&self) -> Result<String> {
        let uuid = endpoint::extract_uuid(&self.id()?)?;
        Ok(self
            .client
            .legacy_url(&["admin", "extension", "vimServer", &uuid]))
    }

    /// Trigger a refresh that syncs up vCenter components such as
    /// supervisors, blocking until the server-side task completes
    ///
    /// Uses the legacy endpoint as there is no OpenAPI endpoint for this
    /// operation.
    pub async fn refresh_vcenter(&self) -> Result<()> {
        self.trigger_legacy_action("refresh").await
    }

    /// Trigger a storage profile refresh, blocking until the server-side
    /// task completes
    ///
    /// Uses the legacy endpoint as there is no OpenAPI endpoint for this
    /// operation.
    pub async fn refresh_storage_profiles(&self) -> Result<()> {
        self.trigger_legacy_action("refreshStorageProfiles").await
    }

    async fn trigger_legacy_action(&self, action: &str) -> Result<()> {
        let uuid = endpoint::extract_uuid(&self.id()?)?;
        let url = self
            .client
            .legacy_url(&["admin", "extension", "vimServer", &uuid, "action", action]);

        let version = self.client.highest_elevated_version(Endpoint::VirtualCenters)?;
        let response = self
            .client
            .request(Method::POST, &url, version, &[])
            .send()
            .await?;
        let record: task::Task = self
            .client
            .handle_response(response, LABEL_VIRTUAL_CENTER)
            .await?;

        let mut task = Task::wrap(&self.client, record);
        task.wait_completion().await
    }
}
