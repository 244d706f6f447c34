//! Box allocation engine for warehouse replenishment planning.
//!
//! This crate is pure, deterministic domain logic (no IO, no HTTP, no storage).
//! Callers supply products, cluster policies and pre-fetched history rows; the
//! engine answers with one allocation per (product, cluster) pair whose totals
//! match each product's requested box count exactly.

pub mod allocator;
pub mod composer;
pub mod demand;
pub mod engine;
pub mod model;
pub mod resolver;

pub use allocator::apportion;
pub use composer::compose;
pub use demand::{FALLBACK_DAILY_SALES, estimate_need};
pub use engine::{AllocationPlan, AllocationRequest, plan};
pub use model::{
    AllocationResult, ClusterNeed, ClusterPolicy, HistoryMatch, HistoryRecord, ProductRequest,
};
pub use resolver::{HistoryIndex, Resolution, normalize_label};
