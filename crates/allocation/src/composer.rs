//! Turns numeric allocations into explainable result records.

use crate::model::{AllocationResult, ClusterNeed, ClusterPolicy, HistoryMatch, ProductRequest};

/// Build the result record for one (product, cluster) pair.
///
/// Formatting only: every number is copied through untouched.
pub fn compose(
    product: &ProductRequest,
    policy: &ClusterPolicy,
    need: &ClusterNeed,
    allocated_boxes: u64,
) -> AllocationResult {
    AllocationResult {
        cluster_id: policy.id,
        cluster_label: policy.label().to_string(),
        product_id: product.id.clone(),
        sku: product.sku.clone(),
        allocated_boxes,
        needed_boxes: need.need_boxes,
        explanation: explain(policy, need, allocated_boxes),
    }
}

fn explain(policy: &ClusterPolicy, need: &ClusterNeed, allocated_boxes: u64) -> String {
    let sales = if need.assumed_sales {
        format!("daily sales {} (assumed)", quantity(need.daily_sales))
    } else {
        format!("daily sales {}", quantity(need.daily_sales))
    };

    let mut text = format!(
        "allocated {allocated_boxes} box(es), needed {} box(es); current stock {}, {sales}; target {} safety day(s)",
        need.need_boxes,
        quantity(need.stock),
        policy.safe_days,
    );

    match need.history {
        HistoryMatch::Exact => {}
        HistoryMatch::SingleRecord => text.push_str("; history taken from the sku's only record"),
        HistoryMatch::Unlabelled => text.push_str("; history taken from an unlabelled record"),
        HistoryMatch::None => text.push_str("; no history found"),
    }

    text
}

/// Whole numbers print without a fractional part.
fn quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
