//! Generic CRUD helpers shared by all resource wrappers
//!
//! Every resource exposes the same five-operation shape; the helpers here
//! implement it once. A wrapper declares how to pair an inner API record
//! with a client via [`OuterEntity`], and each helper negotiates the API
//! version, builds the target URL, issues the call, and maps the response.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use vcd_core::dto::pages::Pages;

use crate::VcdClient;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};

/// Page size requested from collection endpoints
const PAGE_SIZE: &str = "128";

/// Parameters describing one CRUD call against a single endpoint
pub(crate) struct CrudConfig<'a> {
    /// Entity kind used in error and log text
    pub entity_label: &'a str,
    pub endpoint: Endpoint,
    /// Path parameters consumed by the endpoint template
    pub endpoint_params: &'a [&'a str],
    /// Caller query parameters, passed through verbatim
    pub query_parameters: &'a [(&'a str, &'a str)],
}

impl<'a> CrudConfig<'a> {
    pub(crate) fn new(entity_label: &'a str, endpoint: Endpoint) -> Self {
        Self {
            entity_label,
            endpoint,
            endpoint_params: &[],
            query_parameters: &[],
        }
    }

    pub(crate) fn with_params(mut self, endpoint_params: &'a [&'a str]) -> Self {
        self.endpoint_params = endpoint_params;
        self
    }

    pub(crate) fn with_query(mut self, query_parameters: &'a [(&'a str, &'a str)]) -> Self {
        self.query_parameters = query_parameters;
        self
    }
}

/// Pairs an inner API record with the client that produced it
///
/// Implemented by every resource wrapper so the generic helpers below can
/// construct wrappers without knowing the concrete type.
pub(crate) trait OuterEntity: Sized {
    type Inner: Serialize + DeserializeOwned + Default;

    fn wrap(client: &VcdClient, inner: Self::Inner) -> Self;
}

/// POST a payload and wrap the created record
pub(crate) async fn create_outer_entity<O: OuterEntity>(
    client: &VcdClient,
    cfg: CrudConfig<'_>,
    payload: &O::Inner,
) -> Result<O> {
    let inner = create_inner_entity(client, &cfg, payload).await?;
    Ok(O::wrap(client, inner))
}

/// POST a payload and return the raw response record
pub(crate) async fn create_inner_entity<I, O>(
    client: &VcdClient,
    cfg: &CrudConfig<'_>,
    payload: &I,
) -> Result<O>
where
    I: Serialize + ?Sized,
    O: DeserializeOwned,
{
    let version = client.highest_elevated_version(cfg.endpoint)?;
    let url = client.build_endpoint(cfg.endpoint, cfg.endpoint_params)?;
    debug!(entity = cfg.entity_label, url = %url, "creating entity");

    let response = client
        .request(Method::POST, &url, version, cfg.query_parameters)
        .json(payload)
        .send()
        .await?;

    client.handle_response(response, cfg.entity_label).await
}

/// GET a single record and wrap it
pub(crate) async fn get_outer_entity<O: OuterEntity>(
    client: &VcdClient,
    cfg: CrudConfig<'_>,
) -> Result<O> {
    let inner = get_inner_entity(client, &cfg).await?;
    Ok(O::wrap(client, inner))
}

/// GET a single record
pub(crate) async fn get_inner_entity<O: DeserializeOwned>(
    client: &VcdClient,
    cfg: &CrudConfig<'_>,
) -> Result<O> {
    let version = client.highest_elevated_version(cfg.endpoint)?;
    let url = client.build_endpoint(cfg.endpoint, cfg.endpoint_params)?;
    debug!(entity = cfg.entity_label, url = %url, "retrieving entity");

    let response = client
        .request(Method::GET, &url, version, cfg.query_parameters)
        .send()
        .await?;

    client.handle_response(response, cfg.entity_label).await
}

/// GET every record of a collection, wrapping each item individually
pub(crate) async fn get_all_outer_entities<O: OuterEntity>(
    client: &VcdClient,
    cfg: CrudConfig<'_>,
) -> Result<Vec<O>> {
    let inner = get_all_inner_entities(client, &cfg).await?;
    Ok(inner
        .into_iter()
        .map(|record| O::wrap(client, record))
        .collect())
}

/// GET every record of a collection, walking all pages
pub(crate) async fn get_all_inner_entities<O: DeserializeOwned>(
    client: &VcdClient,
    cfg: &CrudConfig<'_>,
) -> Result<Vec<O>> {
    let version = client.highest_elevated_version(cfg.endpoint)?;
    let url = client.build_endpoint(cfg.endpoint, cfg.endpoint_params)?;

    let mut values = Vec::new();
    let mut page: u64 = 1;
    loop {
        let page_param = page.to_string();
        let response = client
            .request(Method::GET, &url, version, cfg.query_parameters)
            .query(&[("page", page_param.as_str()), ("pageSize", PAGE_SIZE)])
            .send()
            .await?;

        let batch: Pages<O> = client.handle_response(response, cfg.entity_label).await?;
        let page_count = batch.page_count;
        values.extend(batch.values);

        if page >= page_count {
            break;
        }
        page += 1;
    }

    debug!(
        entity = cfg.entity_label,
        count = values.len(),
        "retrieved collection"
    );
    Ok(values)
}

/// PUT a payload and wrap the updated record
pub(crate) async fn update_outer_entity<O: OuterEntity>(
    client: &VcdClient,
    cfg: CrudConfig<'_>,
    payload: &O::Inner,
) -> Result<O> {
    let inner = update_inner_entity(client, &cfg, payload).await?;
    Ok(O::wrap(client, inner))
}

/// PUT a payload and return the raw response record
pub(crate) async fn update_inner_entity<I, O>(
    client: &VcdClient,
    cfg: &CrudConfig<'_>,
    payload: &I,
) -> Result<O>
where
    I: Serialize + ?Sized,
    O: DeserializeOwned,
{
    let version = client.highest_elevated_version(cfg.endpoint)?;
    let url = client.build_endpoint(cfg.endpoint, cfg.endpoint_params)?;
    debug!(entity = cfg.entity_label, url = %url, "updating entity");

    let response = client
        .request(Method::PUT, &url, version, cfg.query_parameters)
        .json(payload)
        .send()
        .await?;

    client.handle_response(response, cfg.entity_label).await
}

/// DELETE the record the config's path parameters address
pub(crate) async fn delete_entity_by_id(client: &VcdClient, cfg: CrudConfig<'_>) -> Result<()> {
    let version = client.highest_elevated_version(cfg.endpoint)?;
    let url = client.build_endpoint(cfg.endpoint, cfg.endpoint_params)?;
    debug!(entity = cfg.entity_label, url = %url, "deleting entity");

    let response = client
        .request(Method::DELETE, &url, version, cfg.query_parameters)
        .send()
        .await?;

    client.handle_empty_response(response, cfg.entity_label).await
}

/// Reduce a filtered list to exactly one result
///
/// Zero matches yields the not-found sentinel so callers can distinguish
/// "absent" from "ambiguous".
pub(crate) fn one_or_error<T>(
    key: &str,
    value: &str,
    entity_label: &str,
    mut items: Vec<T>,
) -> Result<T> {
    match items.len() {
        0 => Err(ClientError::EntityNotFound(format!(
            "{entity_label} with {key} '{value}'"
        ))),
        1 => Ok(items.remove(0)),
        n => Err(ClientError::MultipleEntitiesFound(format!(
            "{n} {entity_label} entries with {key} '{value}'"
        ))),
    }
}
