use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use super::{NoticeBanner, PinnedQueryStrip, SavedQueryPanel, dynamic_field::field_control};
use crate::data_definitions::overlay_handle::OverlayHandle;

/// Modal search form. Renders nothing while the overlay is closed.
#[component]
pub fn SearchOverlay() -> Element {
    let handle = use_context::<OverlayHandle>();
    handle.subscribe();
    let controller = handle.controller.clone();
    if !controller.is_open() {
        return rsx! {};
    }

    let fields = controller.fields();
    let close = {
        let controller = controller.clone();
        move |_: MouseEvent| controller.close()
    };
    let search = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            spawn(controller.search());
        }
    };
    let reset = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            spawn(controller.reset());
        }
    };

    rsx! {
        div {
            class: "overlay-backdrop",
            div {
                class: "overlay-panel",
                div {
                    class: "overlay-header",
                    h2 { "Advanced search" }
                    button {
                        class: "icon-button",
                        onclick: close,
                        Icon { icon: MdClose, style: "width: 20px; height: 20px;" }
                    }
                }
                PinnedQueryStrip {}
                div {
                    class: "overlay-fields",
                    for (descriptor, control) in fields {
                        div {
                            key: "{descriptor.key}",
                            class: "overlay-field",
                            label { "{descriptor.label}" }
                            {field_control(descriptor.key.clone(), control, handle.revision)}
                        }
                    }
                }
                div {
                    class: "overlay-actions",
                    button { class: "primary", onclick: search, "Search" }
                    button { onclick: reset, "Reset" }
                }
                NoticeBanner {}
                SavedQueryPanel {}
            }
        }
    }
}
