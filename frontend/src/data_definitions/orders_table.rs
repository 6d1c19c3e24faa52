use async_trait::async_trait;
use common::filter_map::FilterMap;
use dioxus::prelude::*;
use query_engine::ExternalTable;

use crate::data_definitions::demo_orders::{PAGE_SIZE, filter_orders};

/// Signal-backed list table: filters are applied on write, rows only change on refresh.
#[derive(Clone, Copy, PartialEq)]
pub struct OrdersTable {
    pub filters: Signal<FilterMap>,
    pub page_index: Signal<usize>,
    pub refreshes: Signal<u64>,
}

impl OrdersTable {
    pub fn page_count(&self) -> usize {
        filter_orders(&self.filters.peek()).len().div_ceil(PAGE_SIZE).max(1)
    }
}

#[async_trait(?Send)]
impl ExternalTable for OrdersTable {
    fn filter_values(&self) -> FilterMap {
        self.filters.peek().clone()
    }

    async fn set_filter_values(&self, values: FilterMap) {
        let mut filters = self.filters;
        filters.set(values);
    }

    async fn refresh(&self, preserve_page_index: bool) {
        let mut page_index = self.page_index;
        let mut refreshes = self.refreshes;
        let last_page = self.page_count() - 1;
        if !preserve_page_index {
            page_index.set(0);
        } else if *page_index.peek() > last_page {
            page_index.set(last_page);
        }
        refreshes += 1;
        tracing::debug!(refresh = *refreshes.peek(), preserve_page_index, "orders table refreshed");
    }
}
