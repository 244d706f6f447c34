//! Service wiring: fetch history for a request, then run the engine.

use std::sync::Arc;

use shipplan_allocation::{
    AllocationPlan, AllocationRequest, ClusterPolicy, HistoryRecord, ProductRequest, plan,
};
use shipplan_core::{DomainResult, RunId};

use crate::app::dto::ShippingPlanRequest;
use crate::history::{HistoryError, HistorySource};

pub struct AppServices {
    history: Arc<dyn HistorySource>,
}

impl AppServices {
    pub fn new(history: Arc<dyn HistorySource>) -> Self {
        Self { history }
    }

    /// Validate the request, fetch its history and plan the shipment.
    ///
    /// A failing history source does not fail the request: the plan is computed
    /// with empty history, so every cluster uses default stock and sales.
    pub fn plan_shipment(&self, run_id: RunId, body: ShippingPlanRequest) -> DomainResult<AllocationPlan> {
        let span = tracing::info_span!(
            "shipping_plan",
            %run_id,
            user_id = body.user_id.as_deref().unwrap_or("-")
        );
        let _enter = span.enter();

        let products: Vec<ProductRequest> = body.products.into_iter().map(Into::into).collect();
        let clusters: Vec<ClusterPolicy> = body.clusters.into_iter().map(Into::into).collect();
        let mut request = AllocationRequest::new(products, clusters, Vec::new());
        request.validate()?;

        request.history = match self.history.fetch(&distinct_skus(&request.products)) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "history lookup failed; continuing with empty history");
                Vec::new()
            }
        };

        plan(&request)
    }

    pub fn ingest_history(&self, records: Vec<HistoryRecord>) -> Result<usize, HistoryError> {
        let accepted = self.history.ingest(records)?;
        tracing::info!(accepted, "history records ingested");
        Ok(accepted)
    }
}

fn distinct_skus(products: &[ProductRequest]) -> Vec<String> {
    let mut skus: Vec<String> = Vec::with_capacity(products.len());
    for p in products {
        if !skus.contains(&p.sku) {
            skus.push(p.sku.clone());
        }
    }
    skus
}
