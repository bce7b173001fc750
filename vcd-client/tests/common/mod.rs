//! Shared helpers for the wiremock-based integration tests
#![allow(dead_code)]

use vcd_client::VcdClient;
use wiremock::MockServer;

pub async fn mock_server() -> MockServer {
    MockServer::start().await
}

/// Client with every session capability the wrappers gate on
pub fn admin_client(server: &MockServer) -> VcdClient {
    VcdClient::new(server.uri())
        .with_token("test-token")
        .sys_admin(true)
        .tenant_manager(true)
}

/// Wrap records in the pagination envelope collection endpoints return
pub fn single_page(values: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "resultTotal": values.len(),
        "pageCount": if values.is_empty() { 0 } else { 1 },
        "page": 1,
        "pageSize": 128,
        "values": values,
    })
}

/// Error body in the shape the API reports failures with
pub fn error_body(minor_error_code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "minorErrorCode": minor_error_code,
        "message": message,
    })
}
