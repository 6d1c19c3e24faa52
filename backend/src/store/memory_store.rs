//! In-process saved search records.

use std::collections::BTreeMap;

use chrono::Utc;
use common::saved_query::{NewSavedQuery, SavedQuery, SavedQueryError, SavedQueryId};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default)]
struct RepositoryState {
    last_id: SavedQueryId,
    records: BTreeMap<SavedQueryId, SavedQuery>,
}

#[derive(Default)]
pub struct SavedSearchRepository {
    state: RwLock<RepositoryState>,
}

impl SavedSearchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of `page_path` owned by `owner`, plus other owners' shared ones when
    /// `include_shared` is set. Newest update first.
    pub async fn list(&self, owner: &str, page_path: &str, include_shared: bool) -> Vec<SavedQuery> {
        let state = self.state.read().await;
        let mut items = state
            .records
            .values()
            .filter(|q| q.page_path == page_path)
            .filter(|q| q.owner_id == owner || (include_shared && q.is_shared))
            .cloned()
            .collect::<Vec<_>>();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        items
    }

    pub async fn create(&self, owner: &str, query: NewSavedQuery) -> Result<SavedQuery, SavedQueryError> {
        let query = query.validated()?;
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let saved = SavedQuery {
            id: state.last_id,
            page_path: query.page_path,
            name: query.name,
            is_shared: query.is_shared,
            is_pinned: query.is_pinned,
            owner_id: owner.to_string(),
            filter_map: query.filter_map,
            created_at: now,
            updated_at: now,
        };
        state.records.insert(saved.id, saved.clone());
        info!(id = saved.id, owner, page = %saved.page_path, "saved search stored");
        Ok(saved)
    }

    /// Only the owner may delete; anything else looks like a missing record.
    pub async fn delete(&self, owner: &str, id: SavedQueryId) -> Result<(), SavedQueryError> {
        let mut state = self.state.write().await;
        match state.records.get(&id) {
            Some(record) if record.owner_id == owner => {
                state.records.remove(&id);
                info!(id, owner, "saved search removed");
                Ok(())
            }
            _ => Err(SavedQueryError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use common::filter_map::{FilterMap, FilterValue};

    use super::*;

    fn query(page_path: &str, name: &str, is_shared: bool) -> NewSavedQuery {
        NewSavedQuery {
            page_path: page_path.to_string(),
            name: name.to_string(),
            is_shared,
            is_pinned: false,
            filter_map: FilterMap::from([("status".to_string(), FilterValue::text("active"))]),
        }
    }

    #[tokio::test]
    async fn list_scopes_by_page_owner_and_sharing() {
        let repo = SavedSearchRepository::new();
        repo.create("u1", query("/orders", "mine", false)).await.unwrap();
        repo.create("u2", query("/orders", "theirs", false)).await.unwrap();
        repo.create("u2", query("/orders", "team", true)).await.unwrap();
        repo.create("u1", query("/devices", "elsewhere", true)).await.unwrap();

        let names = |items: Vec<SavedQuery>| items.into_iter().map(|q| q.name).collect::<Vec<_>>();
        assert_eq!(names(repo.list("u1", "/orders", true).await), vec!["team", "mine"]);
        assert_eq!(names(repo.list("u1", "/orders", false).await), vec!["mine"]);
    }

    #[tokio::test]
    async fn create_rejects_blank_names_and_empty_filters() {
        let repo = SavedSearchRepository::new();
        assert_eq!(repo.create("u1", query("/orders", "  ", false)).await, Err(SavedQueryError::EmptyName));
        let mut empty = query("/orders", "x", false);
        empty.filter_map = FilterMap::from([("status".to_string(), FilterValue::text(""))]);
        assert_eq!(repo.create("u1", empty).await, Err(SavedQueryError::EmptyFilters));
        assert!(repo.list("u1", "/orders", true).await.is_empty());
    }

    #[tokio::test]
    async fn only_the_owner_can_delete() {
        let repo = SavedSearchRepository::new();
        let saved = repo.create("u1", query("/orders", "team", true)).await.unwrap();
        assert_eq!(repo.delete("u2", saved.id).await, Err(SavedQueryError::NotFound(saved.id)));
        assert_eq!(repo.delete("u1", saved.id).await, Ok(()));
        assert_eq!(repo.delete("u1", saved.id).await, Err(SavedQueryError::NotFound(saved.id)));
    }
}
