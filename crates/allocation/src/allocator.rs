//! Largest-remainder (Hamilton) apportionment of boxes across clusters.
//!
//! Each cluster first receives the floor of its proportional share; leftover
//! boxes go one each to the clusters with the largest fractional remainders.
//! Shares are computed with integer arithmetic over the common denominator
//! `total_need`, so remainders compare exactly.
//!
//! Known property: like any Hamilton method this is subject to the Alabama
//! paradox (raising `target` can lower one cluster's share). Downstream plans
//! depend on the exact tie-breaking, so the method is kept as is.

use shipplan_core::{DomainError, DomainResult};

/// Split `target` boxes across buckets weighted by `weights`.
///
/// The result has one entry per weight and always sums to `target`.
/// Remainder ties go to the lower input index. When every weight is zero the
/// boxes are dealt round-robin in input order.
pub fn apportion(target: u64, weights: &[u64]) -> DomainResult<Vec<u64>> {
    let n = weights.len();

    if target == 0 {
        return Ok(vec![0; n]);
    }
    if n == 0 {
        return Err(DomainError::invariant(format!(
            "cannot apportion {target} boxes across zero clusters"
        )));
    }

    let total_need: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if total_need == 0 {
        return Ok(round_robin(target, n));
    }

    let target_wide = u128::from(target);
    let mut allocation = Vec::with_capacity(n);
    // (remainder numerator, input index)
    let mut remainders: Vec<(u128, usize)> = Vec::with_capacity(n);

    for (index, &weight) in weights.iter().enumerate() {
        let scaled = target_wide * u128::from(weight);
        // floor(scaled / total_need) <= target, fits in u64.
        allocation.push((scaled / total_need) as u64);
        remainders.push((scaled % total_need, index));
    }

    let assigned: u64 = allocation.iter().sum();
    let remain = (target - assigned) as usize;
    if remain >= n {
        return Err(DomainError::invariant(format!(
            "remainder {remain} out of range for {n} clusters"
        )));
    }

    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, index) in remainders.iter().take(remain) {
        allocation[index] += 1;
    }

    Ok(allocation)
}

fn round_robin(target: u64, n: usize) -> Vec<u64> {
    let buckets = n as u64;
    let per_bucket = target / buckets;
    let extra = (target % buckets) as usize;
    (0..n)
        .map(|i| per_bucket + u64::from(i < extra))
        .collect()
}
