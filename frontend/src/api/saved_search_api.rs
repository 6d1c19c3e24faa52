//! Saved search client pointed at the server that served the app.

use std::rc::Rc;

use query_engine::{HttpSavedQueryApi, SavedQueryStore};

pub const DEMO_USER: &str = "demo-user";

fn origin() -> String {
    #[cfg(target_arch = "wasm32")]
    if let Some(origin) = web_sys::window().and_then(|window| window.location().origin().ok()) {
        return origin;
    }
    "http://127.0.0.1:8080".to_string()
}

pub fn saved_query_store() -> SavedQueryStore {
    SavedQueryStore::new(Rc::new(HttpSavedQueryApi::new(origin(), DEMO_USER)))
}
