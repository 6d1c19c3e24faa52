//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use backend::{
            api::saved_searches::{AppState, router},
            config::BackendConfig,
        };

        let config = BackendConfig::from_env()?;
        tracing::info!("saved searches served with user header {}", config.user_header);
        Ok(dioxus::server::router(App).merge(router(AppState::new(&config))))
    });
}
