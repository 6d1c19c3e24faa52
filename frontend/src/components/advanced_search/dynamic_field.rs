//! Markup for one form control of the overlay.

use std::rc::Rc;

use dioxus::prelude::*;
use query_engine::FieldControl;

use super::suggest_input::suggest_combo;

pub fn field_control(key: String, control: FieldControl, revision: Signal<u64>) -> Element {
    match control {
        FieldControl::Text(text) => {
            let placeholder = text.placeholder.clone();
            let value = text.value.clone();
            rsx! {
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    oninput: move |event: Event<FormData>| text.input(event.value()),
                }
            }
        }
        FieldControl::Suggest(combo) => suggest_combo(key, combo, revision),
        FieldControl::Select(dropdown) => {
            let placeholder = dropdown.placeholder.clone();
            let selected = dropdown.selected.clone().unwrap_or_default();
            let choices = dropdown.choices.clone();
            rsx! {
                select {
                    class: "field-input",
                    value: "{selected}",
                    onchange: move |event: Event<FormData>| {
                        let value = event.value();
                        dropdown.select((!value.is_empty()).then_some(value.as_str()));
                    },
                    option { value: "", "{placeholder}" }
                    for choice in choices {
                        option {
                            key: "{choice.value}",
                            value: "{choice.value}",
                            selected: choice.value == selected,
                            "{choice.label}"
                        }
                    }
                }
            }
        }
        FieldControl::Date(date) => {
            let placeholder = date.placeholder.clone();
            let value = date.value.clone().unwrap_or_default();
            rsx! {
                input {
                    class: "field-input",
                    r#type: "date",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    onchange: move |event: Event<FormData>| date.set(Some(event.value())),
                }
            }
        }
        FieldControl::DateRange(range) => {
            let [start_placeholder, end_placeholder] = range.placeholders.clone();
            let start = range.start.clone().unwrap_or_default();
            let end = range.end.clone().unwrap_or_default();
            let range = Rc::new(range);
            let start_range = range.clone();
            rsx! {
                div {
                    class: "date-range",
                    input {
                        class: "field-input",
                        r#type: "date",
                        placeholder: "{start_placeholder}",
                        value: "{start}",
                        onchange: move |event: Event<FormData>| start_range.set_start(Some(event.value())),
                    }
                    span { "–" }
                    input {
                        class: "field-input",
                        r#type: "date",
                        placeholder: "{end_placeholder}",
                        value: "{end}",
                        onchange: move |event: Event<FormData>| range.set_end(Some(event.value())),
                    }
                }
            }
        }
    }
}
