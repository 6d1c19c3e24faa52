use common::saved_query::SavedQuery;
use dioxus::prelude::*;
use dioxus_free_icons::{
    Icon,
    icons::{md_action_icons::MdDelete, md_toggle_icons::{MdStar, MdStarBorder}},
};
use query_engine::{OverlayController, SavedPanelState};

use crate::{
    components::error_boundary::{ComponentErrorDisplay, LoadingIndicator},
    data_definitions::overlay_handle::OverlayHandle,
};

fn saved_query_row(controller: OverlayController, query: SavedQuery, deletable: bool) -> Element {
    let active = controller.is_active(&query);
    let name = query.name.clone();
    let id = query.id;
    let pinned = query.is_pinned;

    let load = {
        let controller = controller.clone();
        let query = query.clone();
        move |_: MouseEvent| {
            spawn(controller.load_saved(&query));
        }
    };
    let toggle_pin = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            let query = query.clone();
            spawn(async move {
                controller.toggle_pin(&query).await;
            });
        }
    };
    let delete = move |_: MouseEvent| {
        let controller = controller.clone();
        spawn(async move {
            controller.delete_saved(id).await;
        });
    };

    rsx! {
        li {
            key: "{id}",
            class: if active { "saved-query active" } else { "saved-query" },
            button { class: "saved-query-name", onclick: load, "{name}" }
            if deletable {
                button {
                    class: "icon-button",
                    title: if pinned { "Unpin" } else { "Pin" },
                    onclick: toggle_pin,
                    if pinned {
                        Icon { icon: MdStar, style: "width: 18px; height: 18px; color: #F59E0B;" }
                    } else {
                        Icon { icon: MdStarBorder, style: "width: 18px; height: 18px;" }
                    }
                }
                button {
                    class: "icon-button",
                    title: "Delete",
                    onclick: delete,
                    Icon { icon: MdDelete, style: "width: 18px; height: 18px;" }
                }
            }
        }
    }
}

#[component]
fn SaveCurrentForm() -> Element {
    let handle = use_context::<OverlayHandle>();
    let mut naming = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut is_shared = use_signal(|| false);
    let mut is_pinned = use_signal(|| false);

    let start = {
        let controller = handle.controller.clone();
        move |_: MouseEvent| {
            if controller.can_save() {
                naming.set(true);
            }
        }
    };
    let save = {
        let controller = handle.controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            let query_name = name.peek().clone();
            spawn(async move {
                let saved = controller.save_current(&query_name, is_shared(), is_pinned()).await;
                if saved.is_some() {
                    naming.set(false);
                    name.set(String::new());
                }
            });
        }
    };

    if !naming() {
        return rsx! {
            button { class: "save-current", onclick: start, "Save current search" }
        };
    }
    rsx! {
        div {
            class: "save-form",
            input {
                class: "field-input",
                r#type: "text",
                placeholder: "Name",
                value: "{name}",
                oninput: move |event: Event<FormData>| name.set(event.value()),
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: is_shared(),
                    onchange: move |event: Event<FormData>| is_shared.set(event.checked()),
                }
                "Share with everyone"
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: is_pinned(),
                    onchange: move |event: Event<FormData>| is_pinned.set(event.checked()),
                }
                "Pin"
            }
            button { class: "primary", onclick: save, "Save" }
            button { onclick: move |_| naming.set(false), "Cancel" }
        }
    }
}

/// Personal and shared saved searches of the page, plus the save form.
#[component]
pub fn SavedQueryPanel() -> Element {
    let handle = use_context::<OverlayHandle>();
    handle.subscribe();
    let controller = handle.controller.clone();

    let body = match controller.saved_panel() {
        SavedPanelState::Idle | SavedPanelState::Loading => rsx! { LoadingIndicator {} },
        SavedPanelState::Failed(error_txt) => rsx! {
            ComponentErrorDisplay {
                error_txt,
                button {
                    onclick: {
                        let controller = controller.clone();
                        move |_| {
                            spawn(controller.reload_saved());
                        }
                    },
                    "Try Again"
                }
            }
        },
        SavedPanelState::Loaded(buckets) => {
            let personal = buckets.personal.into_iter().map(|query| saved_query_row(controller.clone(), query, true));
            let shared = buckets.shared.into_iter().map(|query| {
                let deletable = query.owner_id == crate::api::saved_search_api::DEMO_USER;
                saved_query_row(controller.clone(), query, deletable)
            });
            rsx! {
                div {
                    class: "saved-group",
                    h3 { "My searches" }
                    ul { {personal} }
                }
                div {
                    class: "saved-group",
                    h3 { "Shared searches" }
                    ul { {shared} }
                }
            }
        }
    };

    rsx! {
        div {
            class: "saved-panel",
            SaveCurrentForm {}
            {body}
        }
    }
}
