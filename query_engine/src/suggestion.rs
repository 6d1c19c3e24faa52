//! Per-field suggestion state: debounce, stale-response rejection and loading flag.
//!
//! Static sources are filtered synchronously on every keystroke. Remote sources go through
//! a debounce timer; when a lookup completes its keyword is compared with the field's
//! *current* keyword and the result is dropped if they differ. Superseded lookups are never
//! cancelled, they just land nowhere.

use std::{cell::RefCell, rc::Rc, time::Duration};

use common::suggest_option::SuggestOption;
use futures_util::{FutureExt, future::LocalBoxFuture};
use tracing::{debug, warn};

use crate::{
    option_source::{OptionSource, Suggestions},
    timing,
};

/// Work the caller must spawn on its executor after a keystroke.
pub type SuggestTask = LocalBoxFuture<'static, ()>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestConfig {
    pub debounce: Duration,
    /// Remote lookups are skipped for keywords shorter than this (in characters).
    pub min_remote_keyword_len: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self { debounce: Duration::from_millis(100), min_remote_keyword_len: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionSnapshot {
    pub options: Vec<SuggestOption>,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct SuggestState {
    options: Vec<SuggestOption>,
    loading: bool,
    current_keyword: String,
    /// Bumped on every keystroke; a debounce timer only fires for its own generation.
    generation: u64,
    /// Keyword of the latest dispatched lookup that has not completed yet.
    in_flight: Option<String>,
    /// Keyword whose remote results are currently displayed.
    shown_for: Option<String>,
    closed: bool,
}

type Listener = Rc<dyn Fn(&SuggestionSnapshot)>;

struct Inner {
    source: OptionSource,
    config: SuggestConfig,
    state: RefCell<SuggestState>,
    listener: RefCell<Option<Listener>>,
}

#[derive(Clone)]
pub struct SuggestionController {
    inner: Rc<Inner>,
}

impl SuggestionController {
    pub fn new(source: OptionSource, config: SuggestConfig) -> Self {
        let state = SuggestState { options: source.initial_options(), ..SuggestState::default() };
        Self {
            inner: Rc::new(Inner { source, config, state: RefCell::new(state), listener: RefCell::new(None) }),
        }
    }

    /// Called with a fresh snapshot after every visible change.
    pub fn set_listener(&self, listener: impl Fn(&SuggestionSnapshot) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn snapshot(&self) -> SuggestionSnapshot {
        let state = self.inner.state.borrow();
        SuggestionSnapshot { options: state.options.clone(), loading: state.loading }
    }

    pub fn options(&self) -> Vec<SuggestOption> {
        self.inner.state.borrow().options.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn current_keyword(&self) -> String {
        self.inner.state.borrow().current_keyword.clone()
    }

    /// Stops scheduling lookups. Pending timers become no-ops, in-flight lookups are left to land nowhere.
    pub fn close(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.closed = true;
        state.generation += 1;
        state.loading = false;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.borrow().closed
    }

    /// Keyword-change handler of the combo input. Returns the debounced lookup to spawn, if any.
    pub fn on_keyword_change(&self, keyword: &str) -> Option<SuggestTask> {
        // surrounding whitespace is not part of the keyword; blank means empty
        let keyword = keyword.trim();
        let task = {
            let mut state = self.inner.state.borrow_mut();
            if state.closed {
                return None;
            }
            state.current_keyword = keyword.to_string();
            state.generation += 1;

            if !self.inner.source.is_remote() {
                if let Suggestions::Ready(options) = self.inner.source.suggest(keyword) {
                    state.options = options;
                }
                state.loading = false;
                None
            } else if keyword.chars().count() < self.inner.config.min_remote_keyword_len {
                // covers the empty keyword too
                state.options.clear();
                state.loading = false;
                state.shown_for = None;
                None
            } else if state.in_flight.as_deref() == Some(keyword) {
                state.loading = true;
                None
            } else if state.shown_for.as_deref() == Some(keyword) {
                state.loading = false;
                None
            } else {
                state.loading = true;
                let controller = self.clone();
                let generation = state.generation;
                let keyword = keyword.to_string();
                Some(async move { controller.run_debounced(generation, keyword).await }.boxed_local())
            }
        };
        self.notify();
        task
    }

    async fn run_debounced(self, generation: u64, keyword: String) {
        timing::sleep(self.inner.config.debounce).await;
        {
            let mut state = self.inner.state.borrow_mut();
            if state.closed || state.generation != generation || state.current_keyword != keyword {
                debug!(%keyword, "suggestion lookup superseded before dispatch");
                return;
            }
            state.in_flight = Some(keyword.clone());
        }
        debug!(%keyword, "dispatching suggestion lookup");
        let result = match self.inner.source.suggest(&keyword) {
            Suggestions::Ready(options) => Ok(options),
            Suggestions::Pending(lookup) => lookup.await,
        };
        self.resolve(&keyword, result);
    }

    fn resolve(&self, keyword: &str, result: anyhow::Result<Vec<SuggestOption>>) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.in_flight.as_deref() == Some(keyword) {
                state.in_flight = None;
            }
            if state.current_keyword != keyword {
                debug!(%keyword, current = %state.current_keyword, "discarding stale suggestions");
                return;
            }
            state.options = match result {
                Ok(options) => options,
                Err(e) => {
                    warn!(%keyword, "suggestion lookup failed: {:#}", e);
                    Vec::new()
                }
            };
            state.shown_for = Some(keyword.to_string());
            state.loading = false;
        }
        self.notify();
    }

    fn notify(&self) {
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(&self.snapshot());
        }
    }
}
