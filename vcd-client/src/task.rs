//! Task tracking for long-running operations
//!
//! Some server operations (vCenter refreshes, async creation) answer with a
//! task record instead of a result. Callers poll the task until it reaches a
//! terminal status; the synchronous wrappers in this crate do that polling
//! on the caller's behalf.

use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use vcd_core::domain::task::{self, TaskStatus};

use crate::VcdClient;
use crate::crud::{self, CrudConfig, OuterEntity};
use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};

const LABEL_TASK: &str = "Task";

/// How often a waiting caller polls the task status
const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// How long a waiting caller keeps polling before giving up
const POLL_TIMEOUT: Duration = Duration::from_secs(600);

/// A server-side task paired with the client used to poll it
#[derive(Debug, Clone)]
pub struct Task {
    /// The most recently fetched task record
    pub record: task::Task,
    client: VcdClient,
}

impl OuterEntity for Task {
    type Inner = task::Task;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self {
        Self {
            record: inner,
            client: client.clone(),
        }
    }
}

impl VcdClient {
    /// Get a task by its ID
    pub async fn get_task_by_id(&self, id: &str) -> Result<Task> {
        let params: [&str; 1] = [id];
        let cfg = CrudConfig::new(LABEL_TASK, Endpoint::Tasks).with_params(&params);
        crud::get_outer_entity(self, cfg).await
    }
}

impl Task {
    /// Re-fetch the task record from the server
    pub async fn refresh(&mut self) -> Result<()> {
        // Tasks handed back by legacy endpoints carry an absolute href;
        // prefer it over rebuilding the OpenAPI URL
        if let Some(href) = self.record.href.clone().filter(|href| !href.is_empty()) {
            let version = self.client.highest_elevated_version(Endpoint::Tasks)?;
            let response = self
                .client
                .request(Method::GET, &href, version, &[])
                .send()
                .await?;
            self.record = self.client.handle_response(response, LABEL_TASK).await?;
            return Ok(());
        }

        let id = self
            .record
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidRequest("id of the receiver Task is empty".to_string())
            })?;
        let params: [&str; 1] = [&id];
        let cfg = CrudConfig::new(LABEL_TASK, Endpoint::Tasks).with_params(&params);
        self.record = crud::get_inner_entity(&self.client, &cfg).await?;
        Ok(())
    }

    /// Block until the task reaches a terminal status
    ///
    /// Returns Ok on `success`; a task ending in `error` or `aborted` yields
    /// [`ClientError::TaskFailed`] with the server's error message.
    pub async fn wait_completion(&mut self) -> Result<()> {
        self.wait_completion_with(POLL_INTERVAL, POLL_TIMEOUT).await
    }

    /// Like [`Task::wait_completion`] with explicit poll interval and timeout
    pub async fn wait_completion_with(
        &mut self,
        interval: Duration,
        timeout: Duration,
    ) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            match self.record.status {
                TaskStatus::Success => return Ok(()),
                TaskStatus::Error | TaskStatus::Aborted => {
                    let message = self
                        .record
                        .error
                        .as_ref()
                        .map(|error| error.message.clone())
                        .or_else(|| self.record.operation.clone())
                        .unwrap_or_else(|| "no error detail reported".to_string());
                    return Err(ClientError::TaskFailed(message));
                }
                status => {
                    debug!(
                        task = self.record.id.as_deref().unwrap_or("<unknown>"),
                        %status,
                        "waiting for task"
                    );
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(ClientError::TaskTimeout(
                    self.record.id.clone().unwrap_or_default(),
                ));
            }

            tokio::time::sleep(interval).await;
            self.refresh().await?;
        }
    }
}
