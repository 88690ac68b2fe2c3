//! Property-based tests for the filter builder using proptest.

use proptest::prelude::*;
use serde_json::{json, Value};
use standout_filter::{FilterBuilder, Output};

// ============================================================================
// Test helpers
// ============================================================================

fn record_strategy() -> impl Strategy<Value = Value> {
    (-1000i64..1000, "[a-z]{1,10}", any::<bool>()).prop_map(|(value, name, active)| {
        json!({
            "value": value,
            "name": name,
            "active": active,
        })
    })
}

fn records_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(record_strategy(), 0..60)
}

fn values(output: &Output) -> Vec<i64> {
    output
        .records()
        .unwrap_or_default()
        .iter()
        .map(|r| r["value"].as_i64().unwrap())
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// An empty query returns the collection unchanged.
    #[test]
    fn empty_query_matches_all(items in records_strategy()) {
        let out = FilterBuilder::new().get(&items).unwrap();
        prop_assert_eq!(out, Output::Records(items));
    }

    /// Filtering never grows the collection and count agrees with it.
    #[test]
    fn filter_never_grows_collection(
        items in records_strategy(),
        threshold in -1000i64..1000,
    ) {
        let query = FilterBuilder::new().where_op("value", ">", threshold);
        let filtered = query.filter(&items).unwrap();
        prop_assert!(filtered.len() <= items.len());
        prop_assert_eq!(filtered.len(), query.count(&items).unwrap());
    }

    /// Matches come back in input order.
    #[test]
    fn filter_preserves_input_order(
        items in records_strategy(),
        threshold in -1000i64..1000,
    ) {
        let filtered = FilterBuilder::new()
            .where_op("value", "<=", threshold)
            .filter(&items)
            .unwrap();
        let positions: Vec<usize> = filtered
            .iter()
            .map(|kept| items.iter().position(|item| std::ptr::eq(item, *kept)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// `where_eq` is shorthand for `where_op` with `==`.
    #[test]
    fn where_eq_is_loose_equality(
        items in records_strategy(),
        target in -1000i64..1000,
    ) {
        let short = FilterBuilder::new().where_eq("value", target);
        let explicit = FilterBuilder::new().where_op("value", "==", target);
        prop_assert_eq!(short.filter(&items).unwrap(), explicit.filter(&items).unwrap());
    }

    /// Chained clauses and a group around the first one select the same records.
    #[test]
    fn implicit_and_equals_grouped_and(
        items in records_strategy(),
        threshold in -1000i64..1000,
        active in any::<bool>(),
    ) {
        let chained = FilterBuilder::new()
            .where_op("value", ">=", threshold)
            .where_eq("active", active);
        let grouped = FilterBuilder::new()
            .where_group(|q| q.where_op("value", ">=", threshold))
            .where_eq("active", active);
        prop_assert_eq!(chained.filter(&items).unwrap(), grouped.filter(&items).unwrap());
    }

    /// OR accepts exactly the records either side accepts.
    #[test]
    fn or_is_union(
        items in records_strategy(),
        threshold in -1000i64..1000,
        name in "[a-z]{1,3}",
    ) {
        let left = FilterBuilder::new().where_op("value", "<", threshold);
        let right = FilterBuilder::new().where_contains("name", &name);
        let either = FilterBuilder::new()
            .where_op("value", "<", threshold)
            .or_where_contains("name", &name);
        for item in &items {
            prop_assert_eq!(
                either.matches(item).unwrap(),
                left.matches(item).unwrap() || right.matches(item).unwrap()
            );
        }
    }

    /// A negated group and the group itself split the collection.
    #[test]
    fn negation_complements(
        items in records_strategy(),
        threshold in -1000i64..1000,
    ) {
        let kept = FilterBuilder::new()
            .where_group(|q| q.where_op("value", ">", threshold).or_where_field("active"))
            .count(&items)
            .unwrap();
        let dropped = FilterBuilder::new()
            .where_not(|q| q.where_op("value", ">", threshold).or_where_field("active"))
            .count(&items)
            .unwrap();
        prop_assert_eq!(kept + dropped, items.len());
    }

    /// Sanitizing an already sanitized expression changes nothing.
    #[test]
    fn sanitize_is_idempotent(
        threshold in -1000i64..1000,
        empty_groups in 0usize..4,
    ) {
        let mut query = FilterBuilder::new().where_op("value", ">", threshold);
        for _ in 0..empty_groups {
            query = query
                .where_group(|q| q)
                .or_where_group(|q| q.where_group(|q| q.where_field("active")));
        }
        let once = query.expression();
        prop_assert_eq!(once.clone().sanitize(), once);
    }

    /// Membership tests on a field nobody has are always false.
    #[test]
    fn where_in_on_absent_field_is_false(
        items in records_strategy(),
        candidates in prop::collection::vec("[a-z]{0,5}", 0..5),
    ) {
        let count = FilterBuilder::new()
            .where_in("missing", candidates)
            .count(&items)
            .unwrap();
        prop_assert_eq!(count, 0);
    }

    /// Substring matching ignores case by default.
    #[test]
    fn contains_ignores_case(name in "[a-z]{1,10}", start in 0usize..10, len in 1usize..10) {
        let start = start % name.len();
        let end = (start + len).min(name.len());
        let needle = name[start..end].to_uppercase();
        let record = json!({ "name": name.to_uppercase() });
        let lower = json!({ "name": name });

        let query = FilterBuilder::new().where_contains("name", &needle);
        prop_assert!(query.matches(&record).unwrap());
        prop_assert!(query.matches(&lower).unwrap());
    }

    /// String values are compared as data, never interpreted.
    #[test]
    fn arbitrary_strings_are_inert(items in records_strategy(), needle in ".*") {
        let query = FilterBuilder::new().where_eq("name", needle.as_str());
        let filtered = query.filter(&items).unwrap();
        prop_assert!(filtered.iter().all(|r| r["name"] == needle.as_str()));
    }

    /// Sorting orders by the key and keeps every record.
    #[test]
    fn sort_orders_ascending(items in records_strategy()) {
        let out = FilterBuilder::new().sort(["value"]).get(&items).unwrap();
        let sorted = values(&out);
        prop_assert_eq!(sorted.len(), items.len());
        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Grouping partitions the filtered records.
    #[test]
    fn group_partitions_records(
        items in records_strategy(),
        threshold in -1000i64..1000,
    ) {
        let query = FilterBuilder::new()
            .where_op("value", ">=", threshold)
            .group(["active"]);
        let out = query.get(&items).unwrap();
        let groups = out.groups().unwrap();
        prop_assert!(groups.len() <= 2);

        let total: usize = groups.iter().map(|(_, bucket)| bucket.len()).sum();
        prop_assert_eq!(total, query.count(&items).unwrap());
        for (key, bucket) in groups {
            let expected = key == "true";
            prop_assert!(bucket
                .records()
                .unwrap()
                .iter()
                .all(|r| r["active"] == expected));
        }
    }
}
