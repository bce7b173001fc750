//! Integration tests for paginated bulk retrieval and query passthrough

mod common;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{admin_client, mock_server};

fn interface_record(suffix: u32) -> serde_json::Value {
    json!({
        "id": format!("urn:vcloud:interface:acme.iface{suffix}:1.0.0"),
        "name": format!("iface{suffix}"),
        "nss": format!("iface{suffix}"),
        "version": "1.0.0",
        "vendor": "acme",
        "readonly": false
    })
}

fn page(page: u64, page_count: u64, values: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "resultTotal": 3,
        "pageCount": page_count,
        "page": page,
        "pageSize": 2,
        "values": values,
    })
}

#[tokio::test]
async fn get_all_walks_every_page() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/interfaces/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            1,
            2,
            vec![interface_record(1), interface_record(2)],
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/interfaces/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            2,
            2,
            vec![interface_record(3)],
        )))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let interfaces = client.get_all_defined_interfaces(&[]).await.unwrap();

    assert_eq!(interfaces.len(), 3);
    assert_eq!(interfaces[0].record.name, "iface1");
    assert_eq!(interfaces[2].record.name, "iface3");
}

#[tokio::test]
async fn caller_query_parameters_pass_through_alongside_paging() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/interfaces/"))
        .and(query_param("filter", "vendor==acme"))
        .and(query_param("sortAsc", "name"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "128"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            1,
            1,
            vec![interface_record(1)],
        )))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let interfaces = client
        .get_all_defined_interfaces(&[("filter", "vendor==acme"), ("sortAsc", "name")])
        .await
        .unwrap();

    assert_eq!(interfaces.len(), 1);
}

#[tokio::test]
async fn get_all_with_an_empty_collection_returns_no_items() {
    let server = mock_server().await;

    Mock::given(method("GET"))
        .and(path("/cloudapi/1.0.0/interfaces/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultTotal": 0,
            "pageCount": 0,
            "page": 1,
            "pageSize": 128,
            "values": []
        })))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let interfaces = client.get_all_defined_interfaces(&[]).await.unwrap();
    assert!(interfaces.is_empty());
}
