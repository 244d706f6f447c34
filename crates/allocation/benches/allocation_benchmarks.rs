use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, TimeZone, Utc};
use shipplan_allocation::{
    AllocationRequest, ClusterPolicy, HistoryRecord, ProductRequest, apportion, plan,
};
use shipplan_core::{ClusterId, ProductId};

const CLUSTER_NAMES: [&str; 8] = [
    "moscow", "spb", "kazan", "ufa", "ekb", "novosibirsk", "krasnodar", "samara",
];

/// Realistic batch: `products` skus, every cluster, three duplicate ingestions per pair.
fn build_request(products: usize) -> AllocationRequest {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let product_requests = (0..products)
        .map(|i| ProductRequest {
            id: ProductId::new(format!("{}", 1_334_000_000 + i)),
            sku: format!("SKU-{i:04}"),
            items_per_box: 6 + (i % 10) as i64,
            box_count: 20 + (i * 7 % 90) as i64,
        })
        .collect();

    let clusters = CLUSTER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| ClusterPolicy {
            id: ClusterId::new(i as i64 + 1),
            name: name.to_string(),
            display_name: String::new(),
            safe_days: 7 + (i as i64 % 3) * 7,
        })
        .collect();

    let mut history = Vec::new();
    for i in 0..products {
        for (c, name) in CLUSTER_NAMES.iter().enumerate() {
            for day in 0..3 {
                history.push(HistoryRecord {
                    sku: format!("SKU-{i:04}"),
                    cluster_label: name.to_uppercase(),
                    stock: ((i + c) * 13 % 120) as f64,
                    daily_sales: ((i * 3 + c + day) % 17) as f64,
                    observed_at: base + Duration::days(day as i64),
                });
            }
        }
    }

    AllocationRequest::new(product_requests, clusters, history)
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    for products in [10usize, 50, 200] {
        let request = build_request(products);
        group.throughput(Throughput::Elements(products as u64));
        group.bench_with_input(BenchmarkId::from_parameter(products), &request, |b, req| {
            b.iter(|| plan(black_box(req)))
        });
    }
    group.finish();
}

fn bench_apportion(c: &mut Criterion) {
    let weights: Vec<u64> = (0..8).map(|i| (i * 37 % 23) as u64).collect();
    c.bench_function("apportion/8_clusters", |b| {
        b.iter(|| apportion(black_box(997), black_box(&weights)))
    });
    c.bench_function("apportion/zero_need", |b| {
        b.iter(|| apportion(black_box(997), black_box(&[0u64; 8])))
    });
}

criterion_group!(benches, bench_plan, bench_apportion);
criterion_main!(benches);
