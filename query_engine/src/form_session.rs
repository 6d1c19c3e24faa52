//! Draft values of one open search form.

use common::filter_map::{FilterMap, FilterValue, strip_empty};

static ABSENT: FilterValue = FilterValue::Null;

/// Plain value container, no validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSession {
    draft: FilterMap,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole draft.
    pub fn hydrate(&mut self, values: FilterMap) -> &mut Self {
        self.draft = values;
        self
    }

    pub fn set_field(&mut self, key: &str, value: FilterValue) {
        self.draft.insert(key.to_string(), value);
    }

    pub fn value(&self, key: &str) -> &FilterValue {
        self.draft.get(key).unwrap_or(&ABSENT)
    }

    /// Copy of the draft holding only present values (`0` and `false` included).
    pub fn get_values(&self) -> FilterMap {
        strip_empty(&self.draft)
    }

    pub fn has_values(&self) -> bool {
        self.draft.values().any(FilterValue::is_present)
    }

    pub fn reset(&mut self) {
        self.draft.clear();
    }
}
