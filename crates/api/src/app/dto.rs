use serde::{Deserialize, Serialize};

use shipplan_allocation::{AllocationResult, ClusterPolicy, HistoryRecord, ProductRequest};
use shipplan_core::{ClusterId, ProductId, RunId};

// -------------------------
// Request DTOs
// -------------------------

/// Camel-case aliases accept payloads from the existing web client.
#[derive(Debug, Deserialize)]
pub struct ProductLine {
    pub id: String,
    pub sku: String,
    #[serde(alias = "boxCount")]
    pub box_count: i64,
    #[serde(alias = "itemsPerBox")]
    pub items_per_box: i64,
}

#[derive(Debug, Deserialize)]
pub struct ClusterLine {
    pub id: i64,
    pub name: String,
    #[serde(default, alias = "displayName", alias = "nameCn")]
    pub display_name: Option<String>,
    #[serde(alias = "safeDays")]
    pub safe_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct ShippingPlanRequest {
    pub products: Vec<ProductLine>,
    pub clusters: Vec<ClusterLine>,
    /// Correlation only; authentication happens upstream.
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IngestHistoryRequest {
    pub records: Vec<HistoryRecord>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ShippingPlanResponse {
    pub success: bool,
    pub run_id: RunId,
    pub results: Vec<AllocationResult>,
    pub message: &'static str,
}

// -------------------------
// Mapping helpers
// -------------------------

impl From<ProductLine> for ProductRequest {
    fn from(line: ProductLine) -> Self {
        ProductRequest {
            id: ProductId::new(line.id),
            sku: line.sku,
            items_per_box: line.items_per_box,
            box_count: line.box_count,
        }
    }
}

impl From<ClusterLine> for ClusterPolicy {
    fn from(line: ClusterLine) -> Self {
        ClusterPolicy {
            id: ClusterId::new(line.id),
            name: line.name,
            display_name: line.display_name.unwrap_or_default(),
            safe_days: line.safe_days,
        }
    }
}
