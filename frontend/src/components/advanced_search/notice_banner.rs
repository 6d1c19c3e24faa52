use dioxus::prelude::*;
use query_engine::Notice;

use crate::data_definitions::overlay_handle::OverlayHandle;

#[component]
pub fn NoticeBanner() -> Element {
    let handle = use_context::<OverlayHandle>();
    handle.subscribe();
    let Some(notice) = handle.controller.notice() else {
        return rsx! {};
    };
    let (class, text) = match notice {
        Notice::Success(text) => ("notice success", text),
        Notice::Warning(text) => ("notice warning", text),
        Notice::Error(text) => ("notice error", text),
    };
    let controller = handle.controller.clone();
    rsx! {
        div {
            class,
            span { "{text}" }
            button {
                class: "notice-dismiss",
                onclick: move |_| controller.clear_notice(),
                "×"
            }
        }
    }
}
