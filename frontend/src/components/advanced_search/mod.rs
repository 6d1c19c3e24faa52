//! Advanced search overlay widgets, driven by the page's [`query_engine::OverlayController`].

mod advanced_search_button;
pub use advanced_search_button::AdvancedSearchButton;

mod search_overlay;
pub use search_overlay::SearchOverlay;

mod dynamic_field;
mod suggest_input;

mod saved_query_panel;
pub use saved_query_panel::SavedQueryPanel;

mod pinned_query_strip;
pub use pinned_query_strip::PinnedQueryStrip;

mod notice_banner;
pub use notice_banner::NoticeBanner;
