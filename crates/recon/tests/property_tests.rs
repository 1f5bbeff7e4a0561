//! Property-based tests for the reconciliation engine.
//!
//! These tests use proptest to generate random datasets and verify that the
//! partition keeps its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **Exhaustiveness**: every input row is accounted for
//! 2. **Disjointness**: no row is classified twice
//! 3. **Cross product**: duplicate keys pair up m × n times
//! 4. **Determinism**: same input always produces same output
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p recon --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p recon --test property_tests
//! ```

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use recon::{CellValue, Dataset, KeyConfig, Partition, RunMetadata, build_report, reconcile};

// =============================================================================
// Test Strategies
// =============================================================================

/// Rows of (key, payload). A small key space forces duplicates and overlap.
fn rows(keys: std::ops::Range<i64>) -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((keys, any::<i64>()), 0..25)
}

fn dataset(name: &str, payload: &str, rows: &[(i64, i64)]) -> Dataset {
    Dataset::from_records(
        name,
        vec!["id".to_string(), payload.to_string()],
        rows.iter()
            .map(|(k, v)| vec![CellValue::from(*k), CellValue::text(v.to_string())])
            .collect(),
    )
    .unwrap()
}

fn key_counts(rows: &[(i64, i64)]) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for (k, _) in rows {
        *counts.entry(*k).or_insert(0) += 1;
    }
    counts
}

fn partition(a_rows: &[(i64, i64)], b_rows: &[(i64, i64)]) -> Partition {
    let a = dataset("a", "v", a_rows);
    let b = dataset("b", "w", b_rows);
    reconcile(&a, &b, "id").unwrap()
}

// =============================================================================
// Partition Invariants
// =============================================================================

proptest! {
    #[test]
    fn every_row_is_classified_once(a_rows in rows(0..6), b_rows in rows(0..6)) {
        let p = partition(&a_rows, &b_rows);

        let matched_a: HashSet<usize> = p.matched.origins.iter().filter_map(|o| o.a).collect();
        let matched_b: HashSet<usize> = p.matched.origins.iter().filter_map(|o| o.b).collect();
        let only_a: Vec<usize> = p.a_only.origins.iter().filter_map(|o| o.a).collect();
        let only_b: Vec<usize> = p.b_only.origins.iter().filter_map(|o| o.b).collect();

        // A-only and B-only rows come from one side only.
        prop_assert!(p.a_only.origins.iter().all(|o| o.b.is_none()));
        prop_assert!(p.b_only.origins.iter().all(|o| o.a.is_none()));

        // No row is both matched and unmatched, and unmatched rows appear once.
        prop_assert!(only_a.iter().all(|i| !matched_a.contains(i)));
        prop_assert!(only_b.iter().all(|i| !matched_b.contains(i)));
        prop_assert_eq!(only_a.iter().collect::<HashSet<_>>().len(), only_a.len());
        prop_assert_eq!(only_b.iter().collect::<HashSet<_>>().len(), only_b.len());

        // Every row lands somewhere.
        prop_assert_eq!(matched_a.len() + only_a.len(), a_rows.len());
        prop_assert_eq!(matched_b.len() + only_b.len(), b_rows.len());
    }

    #[test]
    fn duplicate_keys_form_cross_product(a_rows in rows(0..4), b_rows in rows(0..4)) {
        let p = partition(&a_rows, &b_rows);
        let a_counts = key_counts(&a_rows);
        let b_counts = key_counts(&b_rows);

        let mut matched_per_key: HashMap<String, usize> = HashMap::new();
        for row in &p.matched.rows {
            *matched_per_key.entry(row["id"].to_string()).or_insert(0) += 1;
        }

        for (key, m) in &a_counts {
            let expected = m * b_counts.get(key).copied().unwrap_or(0);
            let actual = matched_per_key.get(&key.to_string()).copied().unwrap_or(0);
            prop_assert_eq!(actual, expected);
        }

        let total: usize = a_counts
            .iter()
            .map(|(k, m)| m * b_counts.get(k).copied().unwrap_or(0))
            .sum();
        prop_assert_eq!(p.matched.len(), total);
    }

    #[test]
    fn disjoint_keys_never_match(a_rows in rows(0..10), b_rows in rows(100..110)) {
        let p = partition(&a_rows, &b_rows);

        prop_assert!(p.matched.is_empty());
        prop_assert_eq!(p.a_only.len(), a_rows.len());
        prop_assert_eq!(p.b_only.len(), b_rows.len());

        // Within a key group, unmatched rows keep their source order.
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (row, origin) in p.a_only.rows.iter().zip(&p.a_only.origins) {
            by_key.entry(row["id"].to_string()).or_default().extend(origin.a);
        }
        for indices in by_key.values() {
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn unique_full_overlap_matches_everything(keys in prop::collection::hash_set(0i64..1000, 0..30)) {
        let a_rows: Vec<(i64, i64)> = keys.iter().map(|k| (*k, 1)).collect();
        let mut b_rows = a_rows.clone();
        b_rows.reverse();

        let p = partition(&a_rows, &b_rows);

        prop_assert_eq!(p.matched.len(), a_rows.len());
        prop_assert!(p.a_only.is_empty());
        prop_assert!(p.b_only.is_empty());
    }

    #[test]
    fn reconciliation_is_deterministic(a_rows in rows(0..6), b_rows in rows(0..6)) {
        let first = partition(&a_rows, &b_rows);
        let second = partition(&a_rows, &b_rows);
        prop_assert_eq!(&first, &second);

        let meta = RunMetadata::new("a", "b", KeyConfig::new("id"));
        prop_assert_eq!(build_report(first, &meta), build_report(second, &meta));
    }
}
