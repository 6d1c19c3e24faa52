//! Saved query presets and their validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter_map::{FilterMap, strip_empty};

pub type SavedQueryId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub id: SavedQueryId,
    pub page_path: String,
    pub name: String,
    pub is_shared: bool,
    #[serde(default)]
    pub is_pinned: bool,
    pub owner_id: String,
    #[serde(rename = "searchParams")]
    pub filter_map: FilterMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /saved-searches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedQuery {
    pub page_path: String,
    pub name: String,
    pub is_shared: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(rename = "searchParams")]
    pub filter_map: FilterMap,
}

impl NewSavedQuery {
    /// Trims the name and drops empty filter values. Fails when nothing meaningful is left.
    pub fn validated(mut self) -> Result<Self, SavedQueryError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(SavedQueryError::EmptyName);
        }
        self.filter_map = strip_empty(&self.filter_map);
        if self.filter_map.is_empty() {
            return Err(SavedQueryError::EmptyFilters);
        }
        Ok(self)
    }
}

impl From<&SavedQuery> for NewSavedQuery {
    fn from(saved: &SavedQuery) -> Self {
        Self {
            page_path: saved.page_path.clone(),
            name: saved.name.clone(),
            is_shared: saved.is_shared,
            is_pinned: saved.is_pinned,
            filter_map: saved.filter_map.clone(),
        }
    }
}

/// Response body of `GET /saved-searches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SavedQueryList {
    pub items: Vec<SavedQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedQueryError {
    #[error("saved query name must not be empty")]
    EmptyName,
    #[error("saved query must constrain at least one field")]
    EmptyFilters,
    #[error("saved query {0} not found")]
    NotFound(SavedQueryId),
}

impl SavedQueryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SavedQueryError::EmptyName | SavedQueryError::EmptyFilters)
    }
}

/// One list call split for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedQueryBuckets {
    pub personal: Vec<SavedQuery>,
    pub shared: Vec<SavedQuery>,
}

impl SavedQueryBuckets {
    pub fn partition(items: &[SavedQuery], current_user: &str) -> Self {
        let mut buckets = Self::default();
        for item in items {
            if item.is_shared {
                buckets.shared.push(item.clone());
            } else if item.owner_id == current_user {
                buckets.personal.push(item.clone());
            }
        }
        buckets
    }

    /// Pinned entries, shared ones first, each group in list order.
    pub fn pinned(&self) -> Vec<SavedQuery> {
        self.shared
            .iter()
            .chain(self.personal.iter())
            .filter(|item| item.is_pinned)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.personal.is_empty() && self.shared.is_empty()
    }
}
