//! Engine input and output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipplan_core::{ClusterId, ProductId};

/// One product line of a shipping request.
///
/// Counts are signed so that bad input can be reported field-by-field by
/// [`AllocationRequest::validate`](crate::AllocationRequest::validate) rather
/// than failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub id: ProductId,
    pub sku: String,
    pub items_per_box: i64,
    /// Total boxes to distribute across all clusters (the allocation target).
    pub box_count: i64,
}

/// Per-cluster replenishment policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterPolicy {
    pub id: ClusterId,
    /// Canonical name, matched against history labels.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Days of sales the cluster wants covered by buffer stock.
    pub safe_days: i64,
}

impl ClusterPolicy {
    /// Label shown to humans: the display name when set, otherwise the canonical name.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Observed stock and sales for a sku in one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub sku: String,
    #[serde(default)]
    pub cluster_label: String,
    pub stock: f64,
    pub daily_sales: f64,
    pub observed_at: DateTime<Utc>,
}

/// How the history record feeding a [`ClusterNeed`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMatch {
    /// Normalized label equals the cluster name.
    Exact,
    /// The sku has exactly one history record, whatever its label.
    SingleRecord,
    /// A record without a cluster label.
    Unlabelled,
    /// Nothing usable; defaults apply.
    None,
}

impl HistoryMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryMatch::Exact => "exact",
            HistoryMatch::SingleRecord => "single_record",
            HistoryMatch::Unlabelled => "unlabelled",
            HistoryMatch::None => "none",
        }
    }
}

/// Derived demand for one (product, cluster) pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterNeed {
    pub cluster_id: ClusterId,
    pub stock: f64,
    pub daily_sales: f64,
    /// `true` when `daily_sales` is the fallback rate, not an observation.
    pub assumed_sales: bool,
    pub demand_items: f64,
    pub need_items: f64,
    pub need_boxes: u64,
    pub history: HistoryMatch,
}

/// Final allocation for one (product, cluster) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub cluster_id: ClusterId,
    pub cluster_label: String,
    pub product_id: ProductId,
    pub sku: String,
    pub allocated_boxes: u64,
    pub needed_boxes: u64,
    pub explanation: String,
}
