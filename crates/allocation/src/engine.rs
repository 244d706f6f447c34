//! Engine entry point: validate, resolve, estimate, apportion, compose.

use serde::{Deserialize, Serialize};

use shipplan_core::{DomainError, DomainResult, FieldViolation, ProductId};

use crate::allocator::apportion;
use crate::composer::compose;
use crate::demand::estimate_need;
use crate::model::{AllocationResult, ClusterNeed, ClusterPolicy, HistoryRecord, ProductRequest};
use crate::resolver::HistoryIndex;

/// Everything one allocation run needs. History rows are pre-fetched by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub products: Vec<ProductRequest>,
    pub clusters: Vec<ClusterPolicy>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

impl AllocationRequest {
    pub fn new(
        products: Vec<ProductRequest>,
        clusters: Vec<ClusterPolicy>,
        history: Vec<HistoryRecord>,
    ) -> Self {
        Self {
            products,
            clusters,
            history,
        }
    }

    /// Check every product and cluster, reporting all violations at once.
    pub fn validate(&self) -> DomainResult<()> {
        let mut violations = Vec::new();

        if !self.products.is_empty() && self.clusters.is_empty() {
            violations.push(FieldViolation::new("clusters", "must not be empty"));
        }

        for (i, product) in self.products.iter().enumerate() {
            if product.id.as_str().trim().is_empty() {
                violations.push(FieldViolation::new(format!("products[{i}].id"), "must not be blank"));
            }
            if product.sku.trim().is_empty() {
                violations.push(FieldViolation::new(format!("products[{i}].sku"), "must not be blank"));
            }
            if product.items_per_box <= 0 {
                violations.push(FieldViolation::new(
                    format!("products[{i}].items_per_box"),
                    format!("must be > 0 (got {})", product.items_per_box),
                ));
            }
            if product.box_count < 0 {
                violations.push(FieldViolation::new(
                    format!("products[{i}].box_count"),
                    format!("must be >= 0 (got {})", product.box_count),
                ));
            }
        }

        for (i, cluster) in self.clusters.iter().enumerate() {
            if cluster.name.trim().is_empty() {
                violations.push(FieldViolation::new(format!("clusters[{i}].name"), "must not be blank"));
            }
            if cluster.safe_days < 0 {
                violations.push(FieldViolation::new(
                    format!("clusters[{i}].safe_days"),
                    format!("must be >= 0 (got {})", cluster.safe_days),
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::invalid_input(violations))
        }
    }
}

/// Output of one run: one result per (product, cluster), product-major in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    results: Vec<AllocationResult>,
}

impl AllocationPlan {
    pub fn results(&self) -> &[AllocationResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<AllocationResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn for_product<'a>(
        &'a self,
        product_id: &'a ProductId,
    ) -> impl Iterator<Item = &'a AllocationResult> + 'a {
        self.results.iter().filter(move |r| &r.product_id == product_id)
    }

    /// Boxes allocated to `product_id` across all clusters.
    pub fn total_for(&self, product_id: &ProductId) -> u64 {
        self.for_product(product_id).map(|r| r.allocated_boxes).sum()
    }
}

/// Run the allocation engine.
///
/// Either every (product, cluster) pair gets a result or the whole call fails.
pub fn plan(request: &AllocationRequest) -> DomainResult<AllocationPlan> {
    request.validate()?;

    let span = tracing::info_span!(
        "allocation_run",
        products = request.products.len(),
        clusters = request.clusters.len(),
        history = request.history.len()
    );
    let _enter = span.enter();

    let index = HistoryIndex::build(&request.history);
    tracing::debug!(distinct_history = index.len(), "history index built");

    let mut results = Vec::with_capacity(request.products.len() * request.clusters.len());
    for product in &request.products {
        results.extend(plan_product(product, &request.clusters, &index)?);
    }

    tracing::info!(results = results.len(), "allocation run complete");
    Ok(AllocationPlan { results })
}

fn plan_product(
    product: &ProductRequest,
    clusters: &[ClusterPolicy],
    index: &HistoryIndex<'_>,
) -> DomainResult<Vec<AllocationResult>> {
    let target = to_count(product.box_count, "box_count")?;
    let items_per_box = to_count(product.items_per_box, "items_per_box")?;

    let needs: Vec<ClusterNeed> = clusters
        .iter()
        .map(|cluster| {
            let resolution = index.resolve(&product.sku, &cluster.name);
            estimate_need(&resolution, cluster, items_per_box)
        })
        .collect();

    let weights: Vec<u64> = needs.iter().map(|n| n.need_boxes).collect();
    let allocation = apportion(target, &weights)?;

    let allocated: u64 = allocation.iter().sum();
    if allocated != target {
        tracing::error!(product_id = %product.id, target, allocated, "allocation does not conserve box count");
        return Err(DomainError::invariant(format!(
            "product {}: allocated {allocated} of {target} boxes",
            product.id
        )));
    }

    Ok(clusters
        .iter()
        .zip(&needs)
        .zip(allocation)
        .map(|((cluster, need), boxes)| {
            tracing::debug!(
                product_id = %product.id,
                cluster_id = %cluster.id,
                need_boxes = need.need_boxes,
                allocated_boxes = boxes,
                history = need.history.as_str(),
                "cluster allocation"
            );
            compose(product, cluster, need, boxes)
        })
        .collect())
}

fn to_count(value: i64, field: &str) -> DomainResult<u64> {
    u64::try_from(value).map_err(|_| DomainError::validation(format!("{field} must be >= 0")))
}
