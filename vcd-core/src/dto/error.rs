//! API error body

use serde::{Deserialize, Serialize};

/// Error body returned by the API on failed requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Machine-readable code, e.g. "BAD_REQUEST"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_error_code: Option<String>,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}
