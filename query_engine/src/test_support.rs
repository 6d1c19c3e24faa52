//! Fakes shared by the engine's unit tests.

use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use common::{
    filter_map::FilterMap,
    saved_query::{NewSavedQuery, SavedQuery, SavedQueryError, SavedQueryId},
    suggest_option::SuggestOption,
};

use crate::{bridge::ExternalTable, option_source::OptionSource, saved_query_store::SavedQueryApi};

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Remote lookup that records every keyword it is called with.
#[derive(Clone, Default)]
pub struct RecordingLookup {
    calls: Rc<RefCell<Vec<String>>>,
    latencies: Rc<HashMap<String, Duration>>,
    default_latency: Duration,
}

impl RecordingLookup {
    pub fn with_latency(latency: Duration) -> Self {
        Self { default_latency: latency, ..Self::default() }
    }

    pub fn with_latencies(latencies: &[(&str, Duration)]) -> Self {
        Self {
            latencies: Rc::new(latencies.iter().map(|(k, d)| (k.to_string(), *d)).collect()),
            ..Self::default()
        }
    }

    pub fn results_for(keyword: &str) -> Vec<SuggestOption> {
        vec![SuggestOption::new(format!("{keyword} (label)"), keyword)]
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn source(&self) -> OptionSource {
        let this = self.clone();
        OptionSource::remote(move |keyword: String| {
            this.calls.borrow_mut().push(keyword.clone());
            let latency = this.latencies.get(&keyword).copied().unwrap_or(this.default_latency);
            async move {
                tokio::time::sleep(latency).await;
                Ok(RecordingLookup::results_for(&keyword))
            }
        })
    }
}

/// Table whose filter store applies writes after a short delay, like a reactive form store.
#[derive(Default)]
pub struct FakeTable {
    pub filters: RefCell<FilterMap>,
    pub refreshes: RefCell<Vec<(bool, FilterMap)>>,
    pub apply_delay: Duration,
    /// Overrides `apply_delay` for one specific value.
    pub slow_apply: Option<(FilterMap, Duration)>,
}

impl FakeTable {
    pub fn with_filters(filters: FilterMap) -> Rc<Self> {
        Rc::new(Self { filters: RefCell::new(filters), ..Self::default() })
    }

    pub fn refreshes(&self) -> Vec<(bool, FilterMap)> {
        self.refreshes.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ExternalTable for FakeTable {
    fn filter_values(&self) -> FilterMap {
        self.filters.borrow().clone()
    }

    async fn set_filter_values(&self, values: FilterMap) {
        let delay = match &self.slow_apply {
            Some((slow, delay)) if *slow == values => *delay,
            _ => self.apply_delay,
        };
        tokio::time::sleep(delay).await;
        *self.filters.borrow_mut() = values;
    }

    async fn refresh(&self, preserve_page_index: bool) {
        let seen = self.filters.borrow().clone();
        self.refreshes.borrow_mut().push((preserve_page_index, seen));
    }
}

/// In-memory saved query service scoped to one caller.
pub struct MemorySavedQueries {
    pub user: String,
    pub records: RefCell<Vec<SavedQuery>>,
    pub list_calls: RefCell<usize>,
    pub fail_writes: RefCell<bool>,
    next_id: RefCell<SavedQueryId>,
}

impl MemorySavedQueries {
    pub fn new(user: &str) -> Rc<Self> {
        Rc::new(Self {
            user: user.to_string(),
            records: RefCell::new(Vec::new()),
            list_calls: RefCell::new(0),
            fail_writes: RefCell::new(false),
            next_id: RefCell::new(1),
        })
    }

    pub fn insert_foreign(&self, owner: &str, page_path: &str, name: &str, is_shared: bool, filter_map: FilterMap) {
        let id = self.take_id();
        let now = Utc::now();
        self.records.borrow_mut().push(SavedQuery {
            id,
            page_path: page_path.to_string(),
            name: name.to_string(),
            is_shared,
            is_pinned: false,
            owner_id: owner.to_string(),
            filter_map,
            created_at: now,
            updated_at: now,
        });
    }

    fn take_id(&self) -> SavedQueryId {
        let mut next = self.next_id.borrow_mut();
        let id = *next;
        *next += 1;
        id
    }
}

#[async_trait(?Send)]
impl SavedQueryApi for MemorySavedQueries {
    async fn list(&self, page_path: &str, include_shared: bool) -> anyhow::Result<Vec<SavedQuery>> {
        *self.list_calls.borrow_mut() += 1;
        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|q| q.page_path == page_path)
            .filter(|q| q.owner_id == self.user || (include_shared && q.is_shared))
            .cloned()
            .collect())
    }

    async fn create(&self, query: NewSavedQuery) -> anyhow::Result<SavedQuery> {
        if *self.fail_writes.borrow() {
            anyhow::bail!("saved search service unavailable");
        }
        let query = query.validated()?;
        let now = Utc::now();
        let saved = SavedQuery {
            id: self.take_id(),
            page_path: query.page_path,
            name: query.name,
            is_shared: query.is_shared,
            is_pinned: query.is_pinned,
            owner_id: self.user.clone(),
            filter_map: query.filter_map,
            created_at: now,
            updated_at: now,
        };
        self.records.borrow_mut().push(saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: SavedQueryId) -> anyhow::Result<()> {
        if *self.fail_writes.borrow() {
            anyhow::bail!("saved search service unavailable");
        }
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|q| !(q.id == id && q.owner_id == self.user));
        if records.len() == before {
            return Err(SavedQueryError::NotFound(id).into());
        }
        Ok(())
    }
}
