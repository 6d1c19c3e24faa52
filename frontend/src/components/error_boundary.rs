//! Error boundaries and the shared error/loading views.

use dioxus::prelude::*;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    div {
                        class: "page-error",
                        h1 { "Something went wrong" }
                        p { "Boundary: {boundary_name}" }
                        a { href: "/", "Back to orders" }
                        pre { "{err:#?}" }
                    }
                }
            },
            children
        }
    }
}

/// Contains a failing widget so the rest of the page keeps working.
#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(error) => format!("{:#?}", error.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button { onclick: move |_| err.clear_errors(), "Try Again" }
                    }
                }
            },
            {children}
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "component-error",
            strong { "Could not load this section" }
            pre { "{error_txt}" }
            {children}
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div { class: "loading-indicator", "Loading..." }
    }
}
