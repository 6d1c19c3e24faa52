use std::rc::Rc;

use dioxus::prelude::*;
use query_engine::field::SuggestInput;

use crate::data_definitions::overlay_handle::bump;

/// Free-text combo with a suggestion list. The value shown is always the form's value.
pub fn suggest_combo(key: String, combo: SuggestInput, revision: Signal<u64>) -> Element {
    combo.controller().set_listener(move |_| bump(revision));
    let snapshot = combo.snapshot();
    let placeholder = combo.placeholder.clone();
    let value = combo.value.clone();
    let picked = snapshot.options.iter().any(|option| option.value == value);
    let combo = Rc::new(combo);

    let typed = combo.clone();
    let on_input = move |event: Event<FormData>| {
        if let Some(task) = typed.input(event.value()) {
            spawn(task);
        }
    };
    let options = snapshot.options.into_iter().map(|option| {
        let combo = combo.clone();
        let label = option.label.clone();
        let option_key = format!("{key}-{}", option.value);
        rsx! {
            li {
                key: "{option_key}",
                class: "suggest-option",
                onmousedown: move |_| combo.select(&option),
                "{label}"
            }
        }
    });

    rsx! {
        div {
            class: "suggest-combo",
            input {
                class: "field-input",
                r#type: "text",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: on_input,
            }
            if snapshot.loading {
                div { class: "suggest-loading", "Loading..." }
            } else if !picked {
                ul { class: "suggest-options", {options} }
            }
        }
    }
}
