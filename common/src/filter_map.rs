//! Filter value maps exchanged between the query form, the table and saved queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One field value of a query form.
///
/// Serialized without tags so the map round-trips as plain JSON (`{"status": "active", "created": ["2024-01-01", "2024-01-31"]}`).
/// Date ranges are a two element `List` of ISO dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FilterValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    pub fn date_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        FilterValue::List(vec![start.into(), end.into()])
    }

    /// `false` for null, the empty string, and a list without any non-empty item
    /// (so an unset date range `["", ""]` is absent). `0` and `false` are present.
    pub fn is_present(&self) -> bool {
        match self {
            FilterValue::Null => false,
            FilterValue::Text(s) => !s.is_empty(),
            FilterValue::List(items) => items.iter().any(|item| !item.is_empty()),
            FilterValue::Bool(_) | FilterValue::Number(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date_range(&self) -> Option<(&str, &str)> {
        match self {
            FilterValue::List(items) if items.len() == 2 => Some((items[0].as_str(), items[1].as_str())),
            _ => None,
        }
    }

    /// Equality used for "is this saved query active": lists ignore order.
    pub fn matches(&self, other: &FilterValue) -> bool {
        match (self, other) {
            (FilterValue::List(a), FilterValue::List(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                let mut a = a.clone();
                let mut b = b.clone();
                a.sort();
                b.sort();
                a == b
            }
            (a, b) => a == b,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::List(value)
    }
}

/// Field key to value. Ordered so equal maps serialize byte-for-byte equal.
pub type FilterMap = BTreeMap<String, FilterValue>;

/// Copy of `map` without the entries whose value is not present.
pub fn strip_empty(map: &FilterMap) -> FilterMap {
    map.iter()
        .filter(|(_, value)| value.is_present())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// `true` when every entry of `expected` appears in `current` with a matching value.
/// An empty `expected` never matches.
pub fn contains_all(current: &FilterMap, expected: &FilterMap) -> bool {
    if expected.is_empty() {
        return false;
    }
    expected.iter().all(|(key, value)| current.get(key).is_some_and(|v| v.matches(value)))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn map(entries: &[(&str, FilterValue)]) -> FilterMap {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn strip_keeps_zero_and_false() {
        let m = map(&[
            ("a", FilterValue::Null),
            ("b", FilterValue::text("")),
            ("c", FilterValue::List(vec![])),
            ("d", FilterValue::from(0)),
            ("e", FilterValue::from(false)),
            ("f", FilterValue::text("x")),
        ]);
        let stripped = strip_empty(&m);
        assert_eq!(stripped.keys().cloned().collect::<Vec<_>>(), vec!["d", "e", "f"]);
    }

    #[test]
    fn unset_date_range_is_absent() {
        assert!(!FilterValue::date_range("", "").is_present());
        assert!(FilterValue::date_range("2024-01-01", "").is_present());
        assert!(FilterValue::date_range("", "2024-01-31").is_present());
        let m = map(&[("created", FilterValue::date_range("", "")), ("status", FilterValue::text("open"))]);
        assert_eq!(strip_empty(&m).keys().cloned().collect::<Vec<_>>(), vec!["status"]);
    }

    #[test]
    fn json_shape_is_untagged() {
        let m = map(&[
            ("status", FilterValue::text("active")),
            ("created", FilterValue::date_range("2024-01-01", "2024-01-31")),
            ("count", FilterValue::from(0)),
        ]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"count":0,"created":["2024-01-01","2024-01-31"],"status":"active"}"#);
        let back: FilterMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn null_deserializes_as_absent() {
        let back: FilterMap = serde_json::from_str(r#"{"a":null,"b":"x"}"#).unwrap();
        assert_eq!(back.get("a"), Some(&FilterValue::Null));
        assert_eq!(strip_empty(&back).len(), 1);
    }

    #[test]
    fn contains_all_ignores_list_order() {
        let current = map(&[
            ("tags", FilterValue::List(vec!["b".into(), "a".into()])),
            ("status", FilterValue::text("active")),
        ]);
        let saved = map(&[("tags", FilterValue::List(vec!["a".into(), "b".into()]))]);
        assert!(contains_all(&current, &saved));
        let other = map(&[("status", FilterValue::text("closed"))]);
        assert!(!contains_all(&current, &other));
        assert!(!contains_all(&current, &FilterMap::new()));
    }

    fn value_strategy() -> impl Strategy<Value = FilterValue> {
        prop_oneof![
            Just(FilterValue::Null),
            any::<bool>().prop_map(FilterValue::Bool),
            any::<i32>().prop_map(|n| FilterValue::from(n as i64)),
            "[a-z]{0,3}".prop_map(FilterValue::Text),
            prop::collection::vec("[a-z]{0,3}", 0..3).prop_map(FilterValue::List),
        ]
    }

    proptest! {
        #[test]
        fn strip_is_idempotent_and_only_drops_absent(entries in prop::collection::btree_map("[a-z]{1,4}", value_strategy(), 0..8)) {
            let stripped = strip_empty(&entries);
            prop_assert_eq!(strip_empty(&stripped), stripped.clone());
            for (key, value) in &entries {
                prop_assert_eq!(stripped.contains_key(key), value.is_present());
            }
        }
    }
}
