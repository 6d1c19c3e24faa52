use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::data_definitions::overlay_handle::OverlayHandle;

/// Opens the overlay. Shows how many filters the table currently applies.
#[component]
pub fn AdvancedSearchButton(active_filters: ReadSignal<usize>) -> Element {
    let handle = use_context::<OverlayHandle>();
    let controller = handle.controller.clone();
    let open_overlay = move |_: MouseEvent| {
        spawn(controller.open());
    };
    let active_filters = active_filters();
    rsx! {
        button {
            class: if active_filters > 0 { "advanced-search-button active" } else { "advanced-search-button" },
            onclick: open_overlay,
            Icon { icon: MdSearch, style: "width: 18px; height: 18px;" }
            "Advanced search"
            if active_filters > 0 {
                span { class: "filter-count", "{active_filters}" }
            }
        }
    }
}
