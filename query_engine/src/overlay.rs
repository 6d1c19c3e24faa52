//! Advanced search overlay: form session, saved query panels and the commit path.
//!
//! Pages only call [`OverlayController::open`], [`OverlayController::close`] and
//! [`OverlayController::is_open`]; everything else is used by the overlay's own widgets.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use common::{
    filter_map::{FilterMap, FilterValue, contains_all},
    saved_query::{NewSavedQuery, SavedQuery, SavedQueryBuckets, SavedQueryError, SavedQueryId},
};
use futures_util::{FutureExt, future::LocalBoxFuture};
use tracing::{error, warn};

use crate::{
    bridge::{BridgeConfig, ExternalTable, QueryBridge},
    field::{FieldControl, FieldDescriptor, FieldRenderer, searchable_fields},
    form_session::FormSession,
    saved_query_store::SavedQueryStore,
    suggestion::SuggestConfig,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    pub suggest: SuggestConfig,
    pub bridge: BridgeConfig,
    /// Pinned queries shown inline; the rest go to an overflow list.
    pub max_visible_pinned: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { suggest: SuggestConfig::default(), bridge: BridgeConfig::default(), max_visible_pinned: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SavedPanelState {
    #[default]
    Idle,
    Loading,
    Loaded(SavedQueryBuckets),
    Failed(String),
}

/// Message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    /// Blocking validation problem; the form stays open.
    Warning(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinnedEntry {
    pub query: SavedQuery,
    /// Every filter of the saved query is part of the committed filters.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PinnedStrip {
    pub visible: Vec<PinnedEntry>,
    pub overflow: Vec<PinnedEntry>,
}

pub struct OverlayContext {
    pub page_path: String,
    pub current_user: String,
    pub schema: Vec<FieldDescriptor>,
    pub table: Rc<dyn ExternalTable>,
    pub store: SavedQueryStore,
}

struct OverlayInner {
    page_path: String,
    current_user: String,
    schema: Vec<FieldDescriptor>,
    config: OverlayConfig,
    session: RefCell<FormSession>,
    renderer: FieldRenderer,
    bridge: QueryBridge,
    store: SavedQueryStore,
    open: Cell<bool>,
    saved: RefCell<SavedPanelState>,
    notice: RefCell<Option<Notice>>,
    load_generation: Cell<u64>,
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

#[derive(Clone)]
pub struct OverlayController {
    inner: Rc<OverlayInner>,
}

impl OverlayController {
    pub fn new(context: OverlayContext, config: OverlayConfig) -> Self {
        let OverlayContext { page_path, current_user, schema, table, store } = context;
        Self {
            inner: Rc::new(OverlayInner {
                page_path,
                current_user,
                schema,
                config,
                session: RefCell::new(FormSession::new()),
                renderer: FieldRenderer::new(config.suggest),
                bridge: QueryBridge::new(table, config.bridge),
                store,
                open: Cell::new(false),
                saved: RefCell::new(SavedPanelState::Idle),
                notice: RefCell::new(None),
                load_generation: Cell::new(0),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Called after every change the overlay widgets may need to re-render for.
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Opens the overlay with the table's current filters in the form. The form is usable
    /// right away; the returned task loads the saved query panels.
    pub fn open(&self) -> LocalBoxFuture<'static, ()> {
        let current = self.inner.bridge.table().filter_values();
        self.inner.session.borrow_mut().hydrate(current);
        self.inner.open.set(true);
        self.notify();
        self.reload_saved()
    }

    pub fn close(&self) {
        self.inner.open.set(false);
        self.inner.renderer.close();
        self.notify();
    }

    pub fn page_path(&self) -> &str {
        &self.inner.page_path
    }

    pub fn bridge(&self) -> &QueryBridge {
        &self.inner.bridge
    }

    pub fn draft(&self) -> FilterMap {
        self.inner.session.borrow().get_values()
    }

    pub fn set_field(&self, key: &str, value: FilterValue) {
        self.inner.session.borrow_mut().set_field(key, value);
        self.notify();
    }

    /// Controls for the searchable fields, bound to the draft.
    pub fn fields(&self) -> Vec<(FieldDescriptor, FieldControl)> {
        let session = self.inner.session.borrow();
        searchable_fields(&self.inner.schema)
            .into_iter()
            .map(|descriptor| {
                let overlay = self.clone();
                let key = descriptor.key.clone();
                let control = self.inner.renderer.render(
                    descriptor,
                    session.value(&descriptor.key),
                    Rc::new(move |value: FilterValue| overlay.set_field(&key, value)),
                );
                (descriptor.clone(), control)
            })
            .collect()
    }

    /// "Search": closes the overlay and commits the draft.
    pub fn search(&self) -> LocalBoxFuture<'static, ()> {
        let values = self.draft();
        self.close();
        let bridge = self.inner.bridge.clone();
        async move { bridge.commit(values).await }.boxed_local()
    }

    /// Clears the form and the table filters. The overlay stays open.
    pub fn reset(&self) -> LocalBoxFuture<'static, ()> {
        self.inner.session.borrow_mut().reset();
        self.notify();
        let bridge = self.inner.bridge.clone();
        async move { bridge.reset().await }.boxed_local()
    }

    /// Loads a saved query into the form and applies it at once. The overlay stays open.
    pub fn load_saved(&self, saved: &SavedQuery) -> LocalBoxFuture<'static, ()> {
        self.inner.session.borrow_mut().hydrate(saved.filter_map.clone());
        self.notify();
        let bridge = self.inner.bridge.clone();
        let values = saved.filter_map.clone();
        async move { bridge.commit(values).await }.boxed_local()
    }

    /// Gate before asking for a name: the draft must constrain at least one field.
    pub fn can_save(&self) -> bool {
        if self.inner.session.borrow().has_values() {
            return true;
        }
        self.set_notice(Notice::Warning("Set at least one search condition first".to_string()));
        false
    }

    pub async fn save_current(&self, name: &str, is_shared: bool, is_pinned: bool) -> Option<SavedQuery> {
        if !self.can_save() {
            return None;
        }
        let query = NewSavedQuery {
            page_path: self.inner.page_path.clone(),
            name: name.to_string(),
            is_shared,
            is_pinned,
            filter_map: self.draft(),
        };
        match self.inner.store.create(query).await {
            Ok(saved) => {
                self.set_notice(Notice::Success("Search saved".to_string()));
                self.reload_saved().await;
                Some(saved)
            }
            Err(e) => {
                self.report_write_error("save", e);
                None
            }
        }
    }

    pub async fn delete_saved(&self, id: SavedQueryId) -> bool {
        match self.inner.store.delete(id).await {
            Ok(()) => {
                self.set_notice(Notice::Success("Saved search deleted".to_string()));
                self.reload_saved().await;
                true
            }
            Err(e) => {
                self.report_write_error("delete", e);
                false
            }
        }
    }

    pub async fn toggle_pin(&self, saved: &SavedQuery) -> bool {
        match self.inner.store.toggle_pin(saved).await {
            Ok(_) => {
                self.reload_saved().await;
                true
            }
            Err(e) => {
                self.report_write_error("pin", e);
                false
            }
        }
    }

    /// Fetches the page's saved queries; only the latest fetch updates the panel.
    pub fn reload_saved(&self) -> LocalBoxFuture<'static, ()> {
        let generation = self.inner.load_generation.get() + 1;
        self.inner.load_generation.set(generation);
        *self.inner.saved.borrow_mut() = SavedPanelState::Loading;
        self.notify();
        let overlay = self.clone();
        async move {
            let result = overlay.inner.store.list(&overlay.inner.page_path, true).await;
            if overlay.inner.load_generation.get() != generation {
                return;
            }
            let state = match result {
                Ok(items) => SavedPanelState::Loaded(SavedQueryBuckets::partition(&items, &overlay.inner.current_user)),
                Err(e) => {
                    error!("failed to load saved searches: {:#}", e);
                    SavedPanelState::Failed(e.to_string())
                }
            };
            *overlay.inner.saved.borrow_mut() = state;
            overlay.notify();
        }
        .boxed_local()
    }

    pub fn saved_panel(&self) -> SavedPanelState {
        self.inner.saved.borrow().clone()
    }

    pub fn is_active(&self, saved: &SavedQuery) -> bool {
        match self.inner.bridge.committed() {
            Some(committed) => contains_all(&committed, &saved.filter_map),
            None => false,
        }
    }

    pub fn pinned(&self) -> PinnedStrip {
        let saved = self.inner.saved.borrow();
        let SavedPanelState::Loaded(buckets) = &*saved else {
            return PinnedStrip::default();
        };
        let mut entries = buckets
            .pinned()
            .into_iter()
            .map(|query| PinnedEntry { active: self.is_active(&query), query })
            .collect::<Vec<_>>();
        let overflow = entries.split_off(entries.len().min(self.inner.config.max_visible_pinned));
        PinnedStrip { visible: entries, overflow }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.inner.notice.borrow().clone()
    }

    pub fn clear_notice(&self) {
        *self.inner.notice.borrow_mut() = None;
        self.notify();
    }

    fn set_notice(&self, notice: Notice) {
        *self.inner.notice.borrow_mut() = Some(notice);
        self.notify();
    }

    fn report_write_error(&self, action: &str, e: anyhow::Error) {
        match e.downcast_ref::<SavedQueryError>() {
            Some(validation) if validation.is_validation() => {
                warn!(action, "saved search rejected: {}", validation);
                self.set_notice(Notice::Warning(validation.to_string()));
            }
            _ => {
                error!(action, "saved search request failed: {:#}", e);
                self.set_notice(Notice::Error(format!("Failed to {action} search: {e}")));
            }
        }
    }

    fn notify(&self) {
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{field::FieldKind, suggest_option::SuggestOption};
    use tokio::{task::LocalSet, time::sleep};

    use super::*;
    use crate::{
        option_source::OptionSource,
        test_support::{FakeTable, MemorySavedQueries, RecordingLookup, ms},
    };

    fn schema(lookup: &RecordingLookup) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::select(
                "status",
                "Status",
                vec![SuggestOption::new("Active", "active"), SuggestOption::new("Closed", "closed")],
            ),
            FieldDescriptor::text("customerId", "Customer").with_suggestions(lookup.source()),
            FieldDescriptor::text("city", "City")
                .with_suggestions(OptionSource::matched(vec![SuggestOption::new("北京", "BJ")])),
            FieldDescriptor::new("createdAt", "Created", FieldKind::DateRange),
            FieldDescriptor::new("actions", "", FieldKind::Action),
        ]
    }

    fn text(entries: &[(&str, &str)]) -> FilterMap {
        entries.iter().map(|(k, v)| (k.to_string(), FilterValue::text(*v))).collect()
    }

    struct Harness {
        overlay: OverlayController,
        table: Rc<FakeTable>,
        api: Rc<MemorySavedQueries>,
        lookup: RecordingLookup,
    }

    fn harness(initial: FilterMap) -> Harness {
        let lookup = RecordingLookup::with_latency(ms(30));
        let table = FakeTable::with_filters(initial);
        let api = MemorySavedQueries::new("u1");
        let overlay = OverlayController::new(
            OverlayContext {
                page_path: "/orders".to_string(),
                current_user: "u1".to_string(),
                schema: schema(&lookup),
                table: table.clone(),
                store: SavedQueryStore::new(api.clone()),
            },
            OverlayConfig::default(),
        );
        Harness { overlay, table, api, lookup }
    }

    #[tokio::test(start_paused = true)]
    async fn open_hydrates_from_table_and_loads_saved_panel() {
        let h = harness(text(&[("status", "active")]));
        h.api.insert_foreign("u2", "/orders", "team view", true, text(&[("status", "closed")]));
        h.api.insert_foreign("u2", "/orders", "someone else's", false, text(&[("status", "closed")]));
        h.api.insert_foreign("u2", "/devices", "other page", true, text(&[("status", "closed")]));

        let load = h.overlay.open();
        assert!(h.overlay.is_open());
        assert_eq!(h.overlay.saved_panel(), SavedPanelState::Loading);
        assert_eq!(h.overlay.draft(), text(&[("status", "active")]));
        assert_eq!(h.overlay.fields().len(), 4);

        load.await;
        let SavedPanelState::Loaded(buckets) = h.overlay.saved_panel() else {
            panic!("saved panel did not load");
        };
        assert!(buckets.personal.is_empty());
        assert_eq!(buckets.shared.iter().map(|q| q.name.as_str()).collect::<Vec<_>>(), vec!["team view"]);
    }

    #[tokio::test(start_paused = true)]
    async fn search_commits_draft_and_closes() {
        let h = harness(FilterMap::new());
        h.overlay.open().await;
        for (descriptor, control) in h.overlay.fields() {
            match (descriptor.key.as_str(), control) {
                ("status", FieldControl::Select(select)) => select.select(Some("active")),
                ("customerId", FieldControl::Suggest(combo)) => assert!(combo.input("".to_string()).is_none()),
                _ => {}
            }
        }
        h.overlay.search().await;
        assert!(!h.overlay.is_open());
        let expected = text(&[("status", "active")]);
        assert_eq!(h.table.filter_values(), expected);
        assert_eq!(h.overlay.bridge().committed(), Some(expected.clone()));
        assert_eq!(h.table.refreshes(), vec![(true, expected)]);
    }

    #[tokio::test(start_paused = true)]
    async fn typed_suggestion_text_reaches_the_draft() {
        LocalSet::new()
            .run_until(async {
                let h = harness(FilterMap::new());
                h.overlay.open().await;
                let fields = h.overlay.fields();
                let Some((_, FieldControl::Suggest(combo))) = fields.iter().find(|(d, _)| d.key == "customerId") else {
                    panic!("customer field should be a suggest combo");
                };
                for keyword in ["a", "ac", "acm"] {
                    if let Some(task) = combo.input(keyword.to_string()) {
                        tokio::task::spawn_local(task);
                    }
                    sleep(ms(20)).await;
                }
                sleep(ms(500)).await;
                assert_eq!(h.lookup.calls(), vec!["acm"]);
                assert_eq!(h.overlay.draft(), text(&[("customerId", "acm")]));

                h.overlay.close();
                assert!(combo.input("acme".to_string()).is_none());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn save_requires_values_and_lands_in_personal_bucket() {
        let h = harness(FilterMap::new());
        h.overlay.open().await;
        assert_eq!(h.overlay.save_current("my filters", false, false).await, None);
        assert!(matches!(h.overlay.notice(), Some(Notice::Warning(_))));

        h.overlay.set_field("status", FilterValue::text("active"));
        assert_eq!(h.overlay.save_current("   ", false, false).await, None);
        assert_eq!(h.overlay.notice(), Some(Notice::Warning(SavedQueryError::EmptyName.to_string())));

        let saved = h.overlay.save_current("my filters", false, false).await.unwrap();
        assert_eq!(saved.filter_map, text(&[("status", "active")]));
        assert!(matches!(h.overlay.notice(), Some(Notice::Success(_))));
        let SavedPanelState::Loaded(buckets) = h.overlay.saved_panel() else {
            panic!("saved panel did not reload");
        };
        assert_eq!(buckets.personal.iter().map(|q| q.name.as_str()).collect::<Vec<_>>(), vec!["my filters"]);
        assert!(buckets.shared.is_empty());
        assert!(h.overlay.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn load_saved_hydrates_and_commits_without_closing() {
        let h = harness(text(&[("city", "SH")]));
        h.api.insert_foreign("u1", "/orders", "key account", false, text(&[("status", "active"), ("customerId", "7")]));
        h.overlay.open().await;
        let SavedPanelState::Loaded(buckets) = h.overlay.saved_panel() else {
            panic!("saved panel did not load");
        };
        let saved = buckets.personal[0].clone();

        h.overlay.load_saved(&saved).await;
        let expected = text(&[("status", "active"), ("customerId", "7")]);
        assert_eq!(h.overlay.draft(), expected);
        assert_eq!(h.table.filter_values(), expected);
        assert_eq!(h.table.refreshes().len(), 1);
        assert!(h.overlay.is_open());
        assert!(h.overlay.is_active(&saved));
    }

    #[tokio::test(start_paused = true)]
    async fn write_failures_surface_as_errors_without_touching_the_panel() {
        let h = harness(FilterMap::new());
        h.api.insert_foreign("u1", "/orders", "mine", false, text(&[("status", "active")]));
        h.overlay.open().await;
        let before = h.overlay.saved_panel();
        *h.api.fail_writes.borrow_mut() = true;
        assert!(!h.overlay.delete_saved(1).await);
        assert!(matches!(h.overlay.notice(), Some(Notice::Error(_))));
        assert_eq!(h.overlay.saved_panel(), before);

        *h.api.fail_writes.borrow_mut() = false;
        assert!(h.overlay.delete_saved(1).await);
        assert_eq!(h.overlay.saved_panel(), SavedPanelState::Loaded(SavedQueryBuckets::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_clears_form_and_committed_filters() {
        let h = harness(text(&[("status", "active")]));
        h.overlay.open().await;
        h.overlay.search().await;
        h.overlay.open().await;
        h.overlay.reset().await;
        assert!(h.overlay.draft().is_empty());
        assert_eq!(h.overlay.bridge().committed(), None);
        assert_eq!(h.table.refreshes().last(), Some(&(false, FilterMap::new())));
        assert!(h.overlay.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn pinned_strip_orders_shared_first_and_caps_visible() {
        let h = harness(FilterMap::new());
        for i in 0..4 {
            h.api.insert_foreign("u1", "/orders", &format!("mine {i}"), false, text(&[("status", "active")]));
        }
        for i in 0..3 {
            h.api.insert_foreign("u2", "/orders", &format!("team {i}"), true, text(&[("status", "closed")]));
        }
        for record in h.api.records.borrow_mut().iter_mut() {
            record.is_pinned = true;
        }
        h.overlay.open().await;
        let first = h.api.records.borrow()[0].clone();
        h.overlay.load_saved(&first).await;

        let strip = h.overlay.pinned();
        let names = strip.visible.iter().map(|e| e.query.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["team 0", "team 1", "team 2", "mine 0", "mine 1"]);
        assert_eq!(strip.overflow.len(), 2);
        assert!(strip.visible[3].active);
        assert!(!strip.visible[0].active);
    }
}
