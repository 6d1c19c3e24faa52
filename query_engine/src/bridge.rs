//! Pushes committed filters into the host table and triggers its refresh.
//!
//! The bridge owns the one canonical committed value. The host table is told about it
//! through [`ExternalTable::set_filter_values`], which resolves once the table observably
//! holds the value. Only then is the refresh issued, after the settle step.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use async_trait::async_trait;
use common::filter_map::{FilterMap, strip_empty};
use tracing::{debug, info};

use crate::timing;

/// The list page's table, opaque to the search overlay.
#[async_trait(?Send)]
pub trait ExternalTable {
    fn filter_values(&self) -> FilterMap;

    /// Resolves when a following `filter_values`/`refresh` sees `values`.
    async fn set_filter_values(&self, values: FilterMap);

    async fn refresh(&self, preserve_page_index: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeConfig {
    /// Extra wait between applying filters and refreshing. Zero is fine for tables whose
    /// `set_filter_values` only resolves once applied.
    pub settle_delay: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { settle_delay: Duration::from_millis(150) }
    }
}

struct BridgeInner {
    table: Rc<dyn ExternalTable>,
    config: BridgeConfig,
    /// `None` until the first commit and again after a reset.
    committed: RefCell<Option<FilterMap>>,
    /// What the latest commit or reset wants the table to hold.
    target: RefCell<FilterMap>,
    generation: Cell<u64>,
}

#[derive(Clone)]
pub struct QueryBridge {
    inner: Rc<BridgeInner>,
}

impl QueryBridge {
    pub fn new(table: Rc<dyn ExternalTable>, config: BridgeConfig) -> Self {
        Self {
            inner: Rc::new(BridgeInner {
                table,
                config,
                committed: RefCell::new(None),
                target: RefCell::new(FilterMap::new()),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn committed(&self) -> Option<FilterMap> {
        self.inner.committed.borrow().clone()
    }

    pub fn table(&self) -> Rc<dyn ExternalTable> {
        self.inner.table.clone()
    }

    /// Apply `values` to the table and the committed reference, settle, then refresh
    /// keeping the current page. A newer commit or reset started meanwhile takes over the refresh.
    pub async fn commit(&self, values: FilterMap) {
        let values = strip_empty(&values);
        let generation = self.begin(values.clone());
        info!(fields = values.len(), "committing search filters");
        if !self.apply(generation, values.clone()).await {
            return;
        }
        *self.inner.committed.borrow_mut() = Some(values);
        self.settle().await;
        if self.inner.generation.get() != generation {
            debug!("commit superseded before refresh");
            return;
        }
        self.inner.table.refresh(true).await;
    }

    /// Clear the table filters, forget the committed value and refresh from the first page.
    pub async fn reset(&self) {
        let generation = self.begin(FilterMap::new());
        info!("resetting search filters");
        if !self.apply(generation, FilterMap::new()).await {
            return;
        }
        *self.inner.committed.borrow_mut() = None;
        self.settle().await;
        if self.inner.generation.get() != generation {
            debug!("reset superseded before refresh");
            return;
        }
        self.inner.table.refresh(false).await;
    }

    /// Settle step between apply and refresh: one executor turn, then the configured delay.
    pub async fn settle(&self) {
        timing::yield_now().await;
        let delay = self.inner.config.settle_delay;
        if !delay.is_zero() {
            timing::sleep(delay).await;
        }
    }

    /// Applies `values` and reports whether `generation` is still the latest operation.
    ///
    /// Applies may resolve out of order. When a newer commit or reset started meanwhile,
    /// this late apply may have overwritten its values, so the table is brought back to
    /// the newest target before giving up.
    async fn apply(&self, generation: u64, values: FilterMap) -> bool {
        self.inner.table.set_filter_values(values).await;
        if self.inner.generation.get() == generation {
            return true;
        }
        debug!(generation, "apply superseded");
        loop {
            let seen = self.inner.generation.get();
            let target = self.inner.target.borrow().clone();
            if self.inner.table.filter_values() == target {
                return false;
            }
            debug!(generation = seen, "restoring newer filters after a late apply");
            self.inner.table.set_filter_values(target).await;
            if self.inner.generation.get() == seen {
                return false;
            }
        }
    }

    fn begin(&self, target: FilterMap) -> u64 {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        *self.inner.target.borrow_mut() = target;
        generation
    }
}
