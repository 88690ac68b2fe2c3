//! Post-filter stages: projection, sorting and grouping.
//!
//! The stages run in a fixed order over the filtered records:
//! [`select`] → [`sort`] → [`group`]. Each stage is a no-op when its key
//! list is empty.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as Json};

use crate::path::FieldPath;
use crate::value::{compare_utf16, FieldValue};

/// Final result of a query.
///
/// Without group keys this is a flat list of records. Each group key adds one
/// level of buckets, keyed by the string form of the grouped value and kept
/// in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A list of records.
    Records(Vec<Json>),
    /// Buckets of nested output.
    Groups(Vec<(String, Output)>),
}

impl Output {
    /// Returns the records, if this is a flat list.
    pub fn records(&self) -> Option<&[Json]> {
        match self {
            Output::Records(records) => Some(records),
            Output::Groups(_) => None,
        }
    }

    /// Returns the buckets, if this output is grouped.
    pub fn groups(&self) -> Option<&[(String, Output)]> {
        match self {
            Output::Groups(groups) => Some(groups),
            Output::Records(_) => None,
        }
    }

    /// Looks up one bucket by key.
    pub fn group(&self, key: &str) -> Option<&Output> {
        self.groups()?
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, output)| output)
    }

    /// Number of records or buckets at this level.
    pub fn len(&self) -> usize {
        match self {
            Output::Records(records) => records.len(),
            Output::Groups(groups) => groups.len(),
        }
    }

    /// Returns `true` if there are no records or buckets at this level.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unwraps a flat list of records.
    pub fn into_records(self) -> Option<Vec<Json>> {
        match self {
            Output::Records(records) => Some(records),
            Output::Groups(_) => None,
        }
    }

    /// Converts to a JSON array (records) or object (buckets).
    ///
    /// Bucket order is only kept if `serde_json` preserves map order.
    pub fn into_value(self) -> Json {
        match self {
            Output::Records(records) => Json::Array(records),
            Output::Groups(groups) => Json::Object(
                groups
                    .into_iter()
                    .map(|(key, output)| (key, output.into_value()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Output::Records(records) => records.serialize(serializer),
            Output::Groups(groups) => {
                let mut map = serializer.serialize_map(Some(groups.len()))?;
                for (key, output) in groups {
                    map.serialize_entry(key, output)?;
                }
                map.end()
            }
        }
    }
}

/// Runs all three stages.
pub fn run(
    filtered: Vec<&Json>,
    select_keys: &[FieldPath],
    sort_keys: &[FieldPath],
    group_keys: &[FieldPath],
) -> Output {
    let mut records = select(filtered, select_keys);
    sort(&mut records, sort_keys);
    group(records, group_keys)
}

/// Projects each record onto the given paths.
///
/// Nested paths rebuild nested containers: an index segment rebuilds an
/// array (padded with `null` up to the index), any other segment an
/// object. Absent paths are left out. With no keys, records are passed
/// through unchanged.
pub fn select(records: Vec<&Json>, keys: &[FieldPath]) -> Vec<Json> {
    if keys.is_empty() {
        return records.into_iter().cloned().collect();
    }
    records
        .into_iter()
        .map(|record| {
            let mut picked = Json::Object(Map::new());
            for key in keys {
                if let Some(value) = key.resolve(record).to_json() {
                    insert_path(&mut picked, key.segments(), value);
                }
            }
            picked
        })
        .collect()
}

fn insert_path(target: &mut Json, segments: &[String], value: Json) {
    let Some((first, rest)) = segments.split_first() else {
        *target = value;
        return;
    };
    let slot = match target {
        Json::Object(map) => map.entry(first.clone()).or_insert(Json::Null),
        Json::Array(items) => match index_segment(first) {
            Some(index) => {
                if items.len() <= index {
                    items.resize(index + 1, Json::Null);
                }
                &mut items[index]
            }
            None => return,
        },
        _ => return,
    };
    if let Some(next) = rest.first() {
        if !slot.is_object() && !slot.is_array() {
            *slot = match index_segment(next) {
                Some(_) => Json::Array(Vec::new()),
                None => Json::Object(Map::new()),
            };
        }
    }
    insert_path(slot, rest, value);
}

fn index_segment(segment: &str) -> Option<usize> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}

/// Stable ascending sort; later keys break ties of earlier ones.
pub fn sort(records: &mut [Json], keys: &[FieldPath]) {
    if keys.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        for key in keys {
            let ordering = compare_for_sort(&key.resolve(a), &key.resolve(b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Total order used for sorting.
///
/// Values of the same type compare naturally (numbers numerically, strings
/// by UTF-16 code units, `false < true`). Mixed types order by type:
/// bool, number, string, array, object, null, then absent fields last.
pub fn compare_for_sort(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            let (x, y) = (x.to_f64(), y.to_f64());
            // NaN after every other number
            match (x.is_nan(), y.is_nan()) {
                (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (nan_x, nan_y) => nan_x.cmp(&nan_y),
            }
        }
        (FieldValue::String(x), FieldValue::String(y)) => compare_utf16(x, y),
        _ => a.type_rank().cmp(&b.type_rank()),
    }
}

/// Partitions records into nested buckets, one level per key.
pub fn group(records: Vec<Json>, keys: &[FieldPath]) -> Output {
    let Some((key, rest)) = keys.split_first() else {
        return Output::Records(records);
    };

    let mut buckets: Vec<(String, Vec<Json>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        let name = key.resolve(&record).to_js_string().into_owned();
        match index.get(&name) {
            Some(&i) => buckets[i].1.push(record),
            None => {
                index.insert(name.clone(), buckets.len());
                buckets.push((name, vec![record]));
            }
        }
    }

    Output::Groups(
        buckets
            .into_iter()
            .map(|(name, members)| (name, group(members, rest)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(keys: &[&str]) -> Vec<FieldPath> {
        keys.iter().map(|k| FieldPath::parse(k).unwrap()).collect()
    }

    #[test]
    fn select_projects_and_skips_missing() {
        let data = [json!({"a": 1, "b": 2}), json!({"b": 3})];
        let picked = select(data.iter().collect(), &paths(&["a"]));
        assert_eq!(picked, vec![json!({"a": 1}), json!({})]);
    }

    #[test]
    fn select_nested_paths() {
        let data = [json!({"user": {"name": "ada", "age": 36}, "id": 1})];
        let picked = select(data.iter().collect(), &paths(&["user.name", "id"]));
        assert_eq!(picked, vec![json!({"user": {"name": "ada"}, "id": 1})]);
    }

    #[test]
    fn select_index_paths_rebuild_arrays() {
        let data = [json!({"tags": ["a", "b", "c"], "rows": [{"x": 1, "y": 2}]})];
        let picked = select(data.iter().collect(), &paths(&["tags.0"]));
        assert_eq!(picked, vec![json!({"tags": ["a"]})]);

        let picked = select(data.iter().collect(), &paths(&["tags.2", "tags.0", "rows.0.y"]));
        assert_eq!(
            picked,
            vec![json!({"tags": ["a", null, "c"], "rows": [{"y": 2}]})]
        );
    }

    #[test]
    fn select_unicode_and_hyphenated_keys() {
        let data = [json!({"prénom": "Zoé", "user-id": 7, "x": 0})];
        let picked = select(data.iter().collect(), &paths(&["prénom", "user-id"]));
        assert_eq!(picked, vec![json!({"prénom": "Zoé", "user-id": 7})]);
    }

    #[test]
    fn sort_strings_by_utf16_units() {
        let mut data = vec![json!({"s": "\u{FF61}"}), json!({"s": "\u{1F600}"})];
        sort(&mut data, &paths(&["s"]));
        assert_eq!(data, vec![json!({"s": "\u{1F600}"}), json!({"s": "\u{FF61}"})]);
    }

    #[test]
    fn select_without_keys_passes_through() {
        let data = [json!({"a": 1}), json!("scalar")];
        assert_eq!(select(data.iter().collect(), &[]), data.to_vec());
    }

    #[test]
    fn sort_is_stable_with_tiebreaks() {
        let mut data = vec![
            json!({"p": 2, "n": "b", "i": 0}),
            json!({"p": 1, "n": "z", "i": 1}),
            json!({"p": 2, "n": "a", "i": 2}),
            json!({"p": 1, "n": "z", "i": 3}),
        ];
        sort(&mut data, &paths(&["p", "n"]));
        let order: Vec<i64> = data.iter().map(|r| r["i"].as_i64().unwrap()).collect();
        assert_eq!(order, [1, 3, 2, 0]);
    }

    #[test]
    fn sort_missing_last() {
        let mut data = vec![json!({}), json!({"p": null}), json!({"p": 3}), json!({"p": "x"})];
        sort(&mut data, &paths(&["p"]));
        assert_eq!(
            data,
            vec![json!({"p": 3}), json!({"p": "x"}), json!({"p": null}), json!({})]
        );
    }

    #[test]
    fn compare_nan_last_among_numbers() {
        use crate::value::Number;
        let nan = FieldValue::Number(Number::F64(f64::NAN));
        let one = FieldValue::Number(Number::I64(1));
        assert_eq!(compare_for_sort(&one, &nan), Ordering::Less);
        assert_eq!(compare_for_sort(&nan, &nan), Ordering::Equal);
    }

    #[test]
    fn group_nested_in_first_appearance_order() {
        let data = vec![
            json!({"t": "b", "s": 1}),
            json!({"t": "a", "s": 1}),
            json!({"t": "b", "s": 2}),
            json!({"s": 1}),
        ];
        let out = group(data, &paths(&["t", "s"]));
        let keys: Vec<&str> = out.groups().unwrap().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "undefined"]);

        let b = out.group("b").unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(
            b.group("2").unwrap().records().unwrap(),
            &[json!({"t": "b", "s": 2})]
        );
    }

    #[test]
    fn group_without_keys_is_records() {
        let out = group(vec![json!(1)], &[]);
        assert_eq!(out, Output::Records(vec![json!(1)]));
    }

    #[test]
    fn output_serializes_as_json() {
        let out = Output::Groups(vec![(
            "x".to_string(),
            Output::Records(vec![json!({"a": 1})]),
        )]);
        assert_eq!(serde_json::to_value(&out).unwrap(), json!({"x": [{"a": 1}]}));
        assert_eq!(out.into_value(), json!({"x": [{"a": 1}]}));
    }
}
