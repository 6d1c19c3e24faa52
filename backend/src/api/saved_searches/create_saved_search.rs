use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::saved_query::{NewSavedQuery, SavedQuery};

use super::{AppState, CurrentUser, error_response};

async fn _create_saved_search(state: AppState, user: String, query: NewSavedQuery) -> anyhow::Result<SavedQuery> {
    Ok(state.repository.create(&user, query).await?)
}

pub async fn create_saved_search(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(query): Json<NewSavedQuery>,
) -> Response {
    match _create_saved_search(state, user, query).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => error_response("create_saved_search", e),
    }
}
