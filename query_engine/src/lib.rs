//! Headless engine behind the advanced search overlay of list pages.
//!
//! Everything here is single-threaded: state lives in `Rc<RefCell<..>>` and asynchronous
//! work is handed back to the caller as `LocalBoxFuture`s to spawn on the UI executor.

pub mod timing;
pub mod option_source;
pub mod suggestion;
pub mod field;
pub mod form_session;
pub mod bridge;
pub mod saved_query_store;
pub mod overlay;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::{BridgeConfig, ExternalTable, QueryBridge};
pub use field::{FieldControl, FieldDescriptor, FieldRenderer};
pub use form_session::FormSession;
pub use option_source::OptionSource;
pub use overlay::{Notice, OverlayConfig, OverlayContext, OverlayController, PinnedEntry, PinnedStrip, SavedPanelState};
pub use saved_query_store::{HttpSavedQueryApi, SavedQueryApi, SavedQueryStore};
pub use suggestion::{SuggestConfig, SuggestTask, SuggestionController};
