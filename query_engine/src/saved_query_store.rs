//! Client side of the saved-search service, with a per-page list cache.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use anyhow::Context;
use async_trait::async_trait;
use common::saved_query::{NewSavedQuery, SavedQuery, SavedQueryId, SavedQueryList};
use tracing::info;

pub const DEFAULT_USER_HEADER: &str = "x-user-id";

/// Remote contract: `GET /saved-searches?page=&shared=`, `POST /saved-searches`, `DELETE /saved-searches/{id}`.
#[async_trait(?Send)]
pub trait SavedQueryApi {
    async fn list(&self, page_path: &str, include_shared: bool) -> anyhow::Result<Vec<SavedQuery>>;
    async fn create(&self, query: NewSavedQuery) -> anyhow::Result<SavedQuery>;
    async fn delete(&self, id: SavedQueryId) -> anyhow::Result<()>;
}

pub struct HttpSavedQueryApi {
    client: reqwest::Client,
    base_url: String,
    user_header: String,
    user_id: String,
}

impl HttpSavedQueryApi {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_header: DEFAULT_USER_HEADER.to_string(),
            user_id: user_id.into(),
        }
    }

    pub fn with_user_header(mut self, header: impl Into<String>) -> Self {
        self.user_header = header.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/saved-searches{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("saved search request failed ({status}): {body}")
    }
}

#[async_trait(?Send)]
impl SavedQueryApi for HttpSavedQueryApi {
    async fn list(&self, page_path: &str, include_shared: bool) -> anyhow::Result<Vec<SavedQuery>> {
        let response = self
            .client
            .get(self.url(""))
            .query(&[("page", page_path), ("shared", if include_shared { "true" } else { "false" })])
            .header(self.user_header.as_str(), self.user_id.as_str())
            .send()
            .await
            .context("Failed to list saved searches")?;
        let list: SavedQueryList = Self::check(response).await?.json().await.context("Failed to parse saved searches")?;
        Ok(list.items)
    }

    async fn create(&self, query: NewSavedQuery) -> anyhow::Result<SavedQuery> {
        let response = self
            .client
            .post(self.url(""))
            .header(self.user_header.as_str(), self.user_id.as_str())
            .json(&query)
            .send()
            .await
            .context("Failed to create saved search")?;
        Self::check(response).await?.json().await.context("Failed to parse saved search")
    }

    async fn delete(&self, id: SavedQueryId) -> anyhow::Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{id}")))
            .header(self.user_header.as_str(), self.user_id.as_str())
            .send()
            .await
            .context("Failed to delete saved search")?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Saved queries with lists cached per page path. Any create or delete on a page drops
/// that page's cached lists; nothing is updated optimistically.
#[derive(Clone)]
pub struct SavedQueryStore {
    api: Rc<dyn SavedQueryApi>,
    cache: Rc<RefCell<HashMap<(String, bool), Vec<SavedQuery>>>>,
}

impl SavedQueryStore {
    pub fn new(api: Rc<dyn SavedQueryApi>) -> Self {
        Self { api, cache: Rc::default() }
    }

    pub async fn list(&self, page_path: &str, include_shared: bool) -> anyhow::Result<Vec<SavedQuery>> {
        let key = (page_path.to_string(), include_shared);
        if let Some(items) = self.cache.borrow().get(&key) {
            return Ok(items.clone());
        }
        let items = self.api.list(page_path, include_shared).await?;
        self.cache.borrow_mut().insert(key, items.clone());
        Ok(items)
    }

    /// Fails with [`common::saved_query::SavedQueryError`] before any request when the name
    /// or the filters are empty.
    pub async fn create(&self, query: NewSavedQuery) -> anyhow::Result<SavedQuery> {
        let query = query.validated()?;
        let page_path = query.page_path.clone();
        let saved = self.api.create(query).await?;
        info!(id = saved.id, page = %page_path, "saved search created");
        self.invalidate(&page_path);
        Ok(saved)
    }

    pub async fn delete(&self, id: SavedQueryId) -> anyhow::Result<()> {
        self.api.delete(id).await?;
        info!(id, "saved search deleted");
        match self.cached_page_of(id) {
            Some(page_path) => self.invalidate(&page_path),
            None => self.cache.borrow_mut().clear(),
        }
        Ok(())
    }

    /// Records are never edited in place: the replacement is created, then the old one deleted.
    pub async fn replace(&self, id: SavedQueryId, query: NewSavedQuery) -> anyhow::Result<SavedQuery> {
        let saved = self.create(query).await?;
        self.delete(id).await?;
        Ok(saved)
    }

    pub async fn toggle_pin(&self, saved: &SavedQuery) -> anyhow::Result<SavedQuery> {
        let mut query = NewSavedQuery::from(saved);
        query.is_pinned = !saved.is_pinned;
        self.replace(saved.id, query).await
    }

    pub fn invalidate(&self, page_path: &str) {
        self.cache.borrow_mut().retain(|(page, _), _| page != page_path);
    }

    fn cached_page_of(&self, id: SavedQueryId) -> Option<String> {
        self.cache
            .borrow()
            .values()
            .flatten()
            .find(|item| item.id == id)
            .map(|item| item.page_path.clone())
    }
}
