use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_toggle_icons::MdStar};
use query_engine::{OverlayController, PinnedEntry};

use crate::data_definitions::overlay_handle::OverlayHandle;

fn pinned_chip(controller: OverlayController, entry: PinnedEntry) -> Element {
    let class = if entry.active { "pinned-chip active" } else { "pinned-chip" };
    let name = entry.query.name.clone();
    let key = entry.query.id;
    rsx! {
        button {
            key: "{key}",
            class,
            title: if entry.query.is_shared { "Shared search" } else { "Personal search" },
            onclick: move |_| {
                spawn(controller.load_saved(&entry.query));
            },
            "{name}"
        }
    }
}

/// Pinned saved searches for one-click apply; the ones past the visible limit sit in a menu.
#[component]
pub fn PinnedQueryStrip() -> Element {
    let handle = use_context::<OverlayHandle>();
    handle.subscribe();
    let mut overflow_open = use_signal(|| false);
    let strip = handle.controller.pinned();
    if strip.visible.is_empty() {
        return rsx! {};
    }
    let overflow_count = strip.overflow.len();
    let visible = strip.visible.into_iter().map(|entry| pinned_chip(handle.controller.clone(), entry));
    let overflow = strip.overflow.into_iter().map(|entry| pinned_chip(handle.controller.clone(), entry));

    rsx! {
        div {
            class: "pinned-strip",
            Icon { icon: MdStar, style: "width: 18px; height: 18px; color: #F59E0B;" }
            {visible}
            if overflow_count > 0 {
                div {
                    class: "pinned-overflow",
                    button {
                        onclick: move |_| overflow_open.toggle(),
                        "More ({overflow_count})"
                    }
                    if overflow_open() {
                        div { class: "pinned-overflow-menu", {overflow} }
                    }
                }
            }
        }
    }
}
