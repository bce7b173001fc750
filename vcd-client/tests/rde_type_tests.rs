//! Integration tests for RDE type operations against a mock server

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use vcd_client::{ClientError, VcdClient};
use vcd_core::domain::rde::DefinedEntityType;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{admin_client, error_body, mock_server, single_page};

const TYPE_ID: &str = "urn:vcloud:type:acme.cluster:1.0.0";

fn type_record() -> serde_json::Value {
    json!({
        "id": TYPE_ID,
        "name": "cluster",
        "nss": "cluster",
        "version": "1.0.0",
        "vendor": "acme",
        "description": "Kubernetes cluster shape",
        "interfaces": ["urn:vcloud:interface:acme.k8s:1.0.0"],
        "schema": {
            "type": "object",
            "required": ["spec"],
            "properties": {"spec": {"type": "object"}}
        },
        "readonly": false
    })
}

fn creation_payload() -> DefinedEntityType {
    DefinedEntityType {
        name: "cluster".to_string(),
        nss: "cluster".to_string(),
        version: "1.0.0".to_string(),
        vendor: "acme".to_string(),
        description: Some("Kubernetes cluster shape".to_string()),
        interfaces: vec!["urn:vcloud:interface:acme.k8s:1.0.0".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn create_then_get_by_id_returns_equal_record() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cloudapi/1.0.0/entityTypes/"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({"name": "cluster", "vendor": "acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(type_record()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/cloudapi/1.0.0/entityTypes/{TYPE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(type_record()))
        .mount(&server)
        .await;

    let client = admin_client(&server);

    let created = client.create_rde_type(&creation_payload()).await.unwrap();
    assert_eq!(created.record.id.as_deref(), Some(TYPE_ID));
    assert_eq!(created.record.name, "cluster");
    assert_eq!(created.record.schema["type"], "object");

    let fetched = client.get_rde_type_by_id(TYPE_ID).await.unwrap();
    assert_eq!(fetched.record, created.record);
}

#[tokio::test]
async fn create_negotiates_elevated_api_version() {
    let server = mock_server().await;

    // entityTypes elevates to 39.0 with the default version set
    Mock::given(method("POST"))
        .and(path("/cloudapi/1.0.0/entityTypes/"))
        .and(header("Accept", "application/json;version=39.0"))
        .respond_with(ResponseTemplate::new(201).set_body_json(type_record()))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let created = client.create_rde_type(&creation_payload()).await.unwrap();
    assert_eq!(created.record.id.as_deref(), Some(TYPE_ID));
}

#[tokio::test]
async fn get_all_returns_every_listed_type() {
    let server = mock_server().await;

    let second = {
        let mut record = type_record();
        record["id"] = json!("urn:vcloud:type:acme.cluster:2.0.0");
        record["version"] = json!("2.0.0");
        record
    };

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/entityTypes/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(single_page(vec![type_record(), second])),
        )
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let types = client.get_all_rde_types(&[]).await.unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].record.version, "1.0.0");
    assert_eq!(types[1].record.version, "2.0.0");
}

#[tokio::test]
async fn composite_key_lookup_returns_single_match() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/entityTypes/"))
        .and(query_param("filter", "vendor==acme;nss==cluster;version==1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_page(vec![type_record()])))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let rde_type = client.get_rde_type("acme", "cluster", "1.0.0").await.unwrap();
    assert_eq!(rde_type.record.id.as_deref(), Some(TYPE_ID));
}

#[tokio::test]
async fn composite_key_lookup_with_no_match_is_not_found() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/entityTypes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_page(vec![])))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let err = client
        .get_rde_type("acme", "missing", "9.9.9")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got {err:?}");
}

#[tokio::test]
async fn composite_key_lookup_with_several_matches_is_rejected() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/entityTypes/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(single_page(vec![type_record(), type_record()])),
        )
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let err = client
        .get_rde_type("acme", "cluster", "1.0.0")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MultipleEntitiesFound(_)));
}

#[tokio::test]
async fn operations_require_sys_admin_before_any_network_call() {
    // No mocks mounted: a network call would fail loudly
    let client = VcdClient::new("https://vcd.example.com");

    let err = client.create_rde_type(&creation_payload()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let err = client.get_all_rde_types(&[]).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
}

#[tokio::test]
async fn update_rejects_mismatched_payload_id() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path(format!("/cloudapi/1.0.0/entityTypes/{TYPE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(type_record()))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let mut rde_type = client.get_rde_type_by_id(TYPE_ID).await.unwrap();

    let mut config = creation_payload();
    config.id = Some("urn:vcloud:type:other.thing:1.0.0".to_string());

    let err = rde_type.update(config).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn delete_zeroes_the_local_record() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path(format!("/cloudapi/1.0.0/entityTypes/{TYPE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(type_record()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/cloudapi/1.0.0/entityTypes/{TYPE_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/cloudapi/1.0.0/entityTypes/{TYPE_ID}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(error_body("NOT_FOUND", "entity type is gone")),
        )
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let mut rde_type = client.get_rde_type_by_id(TYPE_ID).await.unwrap();

    rde_type.delete().await.unwrap();
    assert_eq!(rde_type.record, DefinedEntityType::default());

    // A second delete has no id to address anymore
    let err = rde_type.delete().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));

    let err = client.get_rde_type_by_id(TYPE_ID).await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got {err:?}");
}
