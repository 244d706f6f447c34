//! Historical record resolution.
//!
//! History rows arrive straight from ingestion: the same (sku, cluster) pair may
//! appear several times, and labels differ in case/whitespace or are missing.
//! [`HistoryIndex`] deduplicates once per run and then answers per-cluster lookups.

use std::collections::{BTreeMap, HashMap};

use crate::model::{HistoryMatch, HistoryRecord};

/// Canonical form of a cluster label: trimmed and lowercased.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Outcome of resolving one (sku, cluster) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub record: Option<&'a HistoryRecord>,
    pub kind: HistoryMatch,
}

impl<'a> Resolution<'a> {
    fn found(record: &'a HistoryRecord, kind: HistoryMatch) -> Self {
        Self {
            record: Some(record),
            kind,
        }
    }

    fn none() -> Self {
        Self {
            record: None,
            kind: HistoryMatch::None,
        }
    }
}

/// Deduplicated history, keyed by sku then normalized cluster label.
#[derive(Debug, Default)]
pub struct HistoryIndex<'a> {
    by_sku: HashMap<&'a str, BTreeMap<String, &'a HistoryRecord>>,
}

impl<'a> HistoryIndex<'a> {
    /// Build the index, keeping only the most recently observed record per
    /// (sku, normalized label). On equal `observed_at` the record supplied later wins.
    pub fn build(records: &'a [HistoryRecord]) -> Self {
        let mut by_sku: HashMap<&'a str, BTreeMap<String, &'a HistoryRecord>> = HashMap::new();

        for record in records {
            let labels = by_sku.entry(record.sku.as_str()).or_default();
            let key = normalize_label(&record.cluster_label);
            match labels.get(&key) {
                Some(current) if current.observed_at > record.observed_at => {}
                _ => {
                    labels.insert(key, record);
                }
            }
        }

        Self { by_sku }
    }

    /// Number of distinct (sku, label) entries after deduplication.
    pub fn len(&self) -> usize {
        self.by_sku.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }

    /// Find the record that best describes `sku` in the cluster called `cluster_name`.
    ///
    /// Order of preference: exact label match, the sku's only record, an
    /// unlabelled record. Never fails; `HistoryMatch::None` means "use defaults".
    pub fn resolve(&self, sku: &str, cluster_name: &str) -> Resolution<'a> {
        let Some(candidates) = self.by_sku.get(sku) else {
            return Resolution::none();
        };

        if let Some(record) = candidates.get(&normalize_label(cluster_name)) {
            return Resolution::found(record, HistoryMatch::Exact);
        }

        if candidates.len() == 1 {
            if let Some(record) = candidates.values().next() {
                return Resolution::found(record, HistoryMatch::SingleRecord);
            }
        }

        match candidates.get("") {
            Some(record) => Resolution::found(record, HistoryMatch::Unlabelled),
            None => Resolution::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    fn record(sku: &str, label: &str, stock: f64, daily_sales: f64, day: u32) -> HistoryRecord {
        HistoryRecord {
            sku: sku.to_string(),
            cluster_label: label.to_string(),
            stock,
            daily_sales,
            observed_at: at(day),
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_label("  Ufa \t"), "ufa");
        assert_eq!(normalize_label("МОСКВА"), "москва");
        assert_eq!(normalize_label("   "), "");
    }

    #[test]
    fn exact_match_ignores_case_and_whitespace() {
        let records = vec![
            record("SKU-1", " UFA ", 10.0, 3.0, 1),
            record("SKU-1", "moscow", 50.0, 9.0, 1),
        ];
        let index = HistoryIndex::build(&records);

        let r = index.resolve("SKU-1", "ufa");
        assert_eq!(r.kind, HistoryMatch::Exact);
        assert_eq!(r.record.unwrap().stock, 10.0);
    }

    #[test]
    fn duplicate_ingestion_keeps_latest_observation() {
        let records = vec![
            record("SKU-1", "ufa", 10.0, 3.0, 5),
            record("SKU-1", "Ufa", 99.0, 7.0, 2),
            record("SKU-1", "ufa ", 20.0, 4.0, 9),
            record("SKU-1", "UFA", 30.0, 5.0, 3),
        ];
        let index = HistoryIndex::build(&records);

        assert_eq!(index.len(), 1);
        let r = index.resolve("SKU-1", "ufa");
        assert_eq!(r.record.unwrap().stock, 20.0);
        assert_eq!(r.record.unwrap().observed_at, at(9));
    }

    #[test]
    fn equal_timestamps_keep_the_later_supplied_record() {
        let records = vec![
            record("SKU-1", "ufa", 10.0, 3.0, 4),
            record("SKU-1", "ufa", 11.0, 3.0, 4),
        ];
        let index = HistoryIndex::build(&records);

        assert_eq!(index.resolve("SKU-1", "ufa").record.unwrap().stock, 11.0);
    }

    #[test]
    fn single_record_is_used_for_any_cluster() {
        let records = vec![record("SKU-1", "kazan", 5.0, 2.0, 1)];
        let index = HistoryIndex::build(&records);

        let r = index.resolve("SKU-1", "ufa");
        assert_eq!(r.kind, HistoryMatch::SingleRecord);
        assert_eq!(r.record.unwrap().cluster_label, "kazan");
    }

    #[test]
    fn single_record_fallback_counts_deduplicated_labels() {
        let records = vec![
            record("SKU-1", "kazan", 5.0, 2.0, 1),
            record("SKU-1", "Kazan", 6.0, 2.0, 2),
        ];
        let index = HistoryIndex::build(&records);

        let r = index.resolve("SKU-1", "ufa");
        assert_eq!(r.kind, HistoryMatch::SingleRecord);
        assert_eq!(r.record.unwrap().stock, 6.0);
    }

    #[test]
    fn unlabelled_record_is_used_when_several_candidates_exist() {
        let records = vec![
            record("SKU-1", "kazan", 5.0, 2.0, 1),
            record("SKU-1", "", 7.0, 3.0, 1),
            record("SKU-1", "  ", 8.0, 3.0, 6),
        ];
        let index = HistoryIndex::build(&records);

        let r = index.resolve("SKU-1", "ufa");
        assert_eq!(r.kind, HistoryMatch::Unlabelled);
        assert_eq!(r.record.unwrap().stock, 8.0);
    }

    #[test]
    fn no_match_when_candidates_are_ambiguous() {
        let records = vec![
            record("SKU-1", "kazan", 5.0, 2.0, 1),
            record("SKU-1", "moscow", 7.0, 3.0, 1),
        ];
        let index = HistoryIndex::build(&records);

        let r = index.resolve("SKU-1", "ufa");
        assert_eq!(r.kind, HistoryMatch::None);
        assert!(r.record.is_none());
    }

    #[test]
    fn other_skus_are_never_candidates() {
        let records = vec![record("SKU-2", "ufa", 5.0, 2.0, 1)];
        let index = HistoryIndex::build(&records);

        assert_eq!(index.resolve("SKU-1", "ufa").kind, HistoryMatch::None);
    }

    #[test]
    fn empty_history_resolves_to_none() {
        let index = HistoryIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.resolve("SKU-1", "ufa"), Resolution::none());
    }
}
