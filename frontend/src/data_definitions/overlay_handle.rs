use dioxus::prelude::*;
use query_engine::{OverlayConfig, OverlayContext, OverlayController};

/// Shared by the overlay widgets through context. `revision` is bumped on every engine
/// change so that reading it subscribes a component to the engine.
#[derive(Clone)]
pub struct OverlayHandle {
    pub controller: OverlayController,
    pub revision: Signal<u64>,
}

impl OverlayHandle {
    pub fn new(context: OverlayContext, revision: Signal<u64>) -> Self {
        let controller = OverlayController::new(context, OverlayConfig::default());
        controller.set_listener(move || bump(revision));
        Self { controller, revision }
    }

    pub fn subscribe(&self) {
        let _ = self.revision.read();
    }
}

pub fn bump(revision: Signal<u64>) {
    let mut revision = revision;
    revision += 1;
}
