//! `/saved-searches` routes.

mod current_user;
pub use current_user::CurrentUser;

mod list_saved_searches;
pub use list_saved_searches::list_saved_searches;

mod create_saved_search;
pub use create_saved_search::create_saved_search;

mod delete_saved_search;
pub use delete_saved_search::delete_saved_search;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use common::saved_query::SavedQueryError;

use crate::{config::BackendConfig, store::SavedSearchRepository};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<SavedSearchRepository>,
    pub user_header: String,
}

impl AppState {
    pub fn new(config: &BackendConfig) -> Self {
        Self { repository: Arc::new(SavedSearchRepository::new()), user_header: config.user_header.clone() }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/saved-searches", get(list_saved_searches).post(create_saved_search))
        .route("/saved-searches/{id}", delete(delete_saved_search))
        .with_state(state)
}

/// Maps a handler failure to a status: validation 422, missing record 404, anything else 500.
fn error_response(handler: &str, e: anyhow::Error) -> Response {
    let status = match e.downcast_ref::<SavedQueryError>() {
        Some(err) if err.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        Some(SavedQueryError::NotFound(_)) => StatusCode::NOT_FOUND,
        _ => {
            tracing::error!("{}: request failed: {:#?}", handler, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Body::from(e.to_string())).into_response()
}
