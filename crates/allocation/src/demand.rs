//! Demand estimation: how many boxes a cluster needs to cover its safety window.

use crate::model::{ClusterNeed, ClusterPolicy, HistoryMatch, HistoryRecord};
use crate::resolver::Resolution;

/// Daily sales assumed when a cluster has no history or recorded exactly zero sales.
///
/// A recorded zero and a missing record are indistinguishable here. This is a
/// business rule pending confirmation, not an arithmetic necessity.
pub const FALLBACK_DAILY_SALES: f64 = 1.0;

/// Estimate the boxes a cluster needs for one product.
///
/// `items_per_box` must be positive (checked by request validation).
pub fn estimate_need(
    resolution: &Resolution<'_>,
    policy: &ClusterPolicy,
    items_per_box: u64,
) -> ClusterNeed {
    let stock = resolution.record.map(observed_stock).unwrap_or(0.0);
    let observed_sales = resolution.record.map(observed_sales).unwrap_or(0.0);

    let assumed_sales = observed_sales == 0.0;
    let daily_sales = if assumed_sales {
        FALLBACK_DAILY_SALES
    } else {
        observed_sales
    };

    let safe_days = policy.safe_days.max(0) as f64;
    let demand_items = daily_sales * safe_days;
    let need_items = (demand_items - stock).max(0.0);
    let need_boxes = boxes_for(need_items, items_per_box.max(1));

    ClusterNeed {
        cluster_id: policy.id,
        stock,
        daily_sales,
        assumed_sales,
        demand_items,
        need_items,
        need_boxes,
        history: if resolution.record.is_some() {
            resolution.kind
        } else {
            HistoryMatch::None
        },
    }
}

fn observed_stock(record: &HistoryRecord) -> f64 {
    non_negative(record.stock)
}

fn observed_sales(record: &HistoryRecord) -> f64 {
    non_negative(record.daily_sales)
}

/// Negative, NaN and infinite observations are treated as zero.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn boxes_for(items: f64, items_per_box: u64) -> u64 {
    (items / items_per_box as f64).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shipplan_core::ClusterId;

    fn policy(safe_days: i64) -> ClusterPolicy {
        ClusterPolicy {
            id: ClusterId::new(7),
            name: "ufa".to_string(),
            display_name: String::new(),
            safe_days,
        }
    }

    fn record(stock: f64, daily_sales: f64) -> HistoryRecord {
        HistoryRecord {
            sku: "SKU-1".to_string(),
            cluster_label: "ufa".to_string(),
            stock,
            daily_sales,
            observed_at: Utc::now(),
        }
    }

    fn exact(record: &HistoryRecord) -> Resolution<'_> {
        Resolution {
            record: Some(record),
            kind: HistoryMatch::Exact,
        }
    }

    fn missing() -> Resolution<'static> {
        Resolution {
            record: None,
            kind: HistoryMatch::None,
        }
    }

    #[test]
    fn need_covers_safety_window_minus_stock() {
        let r = record(12.0, 10.0);
        let need = estimate_need(&exact(&r), &policy(7), 10);

        assert_eq!(need.cluster_id, ClusterId::new(7));
        assert_eq!(need.demand_items, 70.0);
        assert_eq!(need.need_items, 58.0);
        assert_eq!(need.need_boxes, 6);
        assert!(!need.assumed_sales);
        assert_eq!(need.history, HistoryMatch::Exact);
    }

    #[test]
    fn partial_box_rounds_up() {
        let r = record(0.0, 5.0);
        let need = estimate_need(&exact(&r), &policy(7), 10);
        assert_eq!(need.need_boxes, 4);
    }

    #[test]
    fn missing_history_assumes_one_sale_per_day_and_no_stock() {
        let need = estimate_need(&missing(), &policy(14), 4);

        assert_eq!(need.stock, 0.0);
        assert_eq!(need.daily_sales, FALLBACK_DAILY_SALES);
        assert!(need.assumed_sales);
        assert_eq!(need.demand_items, 14.0);
        assert_eq!(need.need_boxes, 4);
        assert_eq!(need.history, HistoryMatch::None);
    }

    #[test]
    fn recorded_zero_sales_uses_fallback_rate() {
        let r = record(3.0, 0.0);
        let need = estimate_need(&exact(&r), &policy(10), 2);

        assert!(need.assumed_sales);
        assert_eq!(need.daily_sales, 1.0);
        assert_eq!(need.need_items, 7.0);
        assert_eq!(need.need_boxes, 4);
    }

    #[test]
    fn excess_stock_floors_need_at_zero() {
        let r = record(500.0, 10.0);
        let need = estimate_need(&exact(&r), &policy(7), 10);

        assert_eq!(need.need_items, 0.0);
        assert_eq!(need.need_boxes, 0);
    }

    #[test]
    fn zero_safe_days_needs_nothing() {
        let r = record(0.0, 10.0);
        assert_eq!(estimate_need(&exact(&r), &policy(0), 10).need_boxes, 0);
    }

    #[test]
    fn bad_observations_are_clamped() {
        let r = record(-40.0, f64::NAN);
        let need = estimate_need(&exact(&r), &policy(5), 1);

        assert_eq!(need.stock, 0.0);
        assert_eq!(need.daily_sales, FALLBACK_DAILY_SALES);
        assert_eq!(need.need_boxes, 5);

        let r = record(f64::INFINITY, -3.0);
        let need = estimate_need(&exact(&r), &policy(5), 1);
        assert_eq!(need.stock, 0.0);
        assert_eq!(need.daily_sales, FALLBACK_DAILY_SALES);
    }

    #[test]
    fn fractional_sales_are_kept() {
        let r = record(0.0, 2.5);
        let need = estimate_need(&exact(&r), &policy(3), 4);

        assert_eq!(need.demand_items, 7.5);
        assert_eq!(need.need_boxes, 2);
    }
}
