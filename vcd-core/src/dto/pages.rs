//! Pagination envelope for collection endpoints

use serde::{Deserialize, Serialize};

/// One page of a paginated collection response
///
/// Collection endpoints never return a bare array; results always arrive
/// wrapped in this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pages<T> {
    /// Total number of results across all pages
    pub result_total: u64,

    pub page_count: u64,

    pub page: u64,

    pub page_size: u64,

    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}
