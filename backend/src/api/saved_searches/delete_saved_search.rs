use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::saved_query::SavedQueryId;

use super::{AppState, CurrentUser, error_response};

async fn _delete_saved_search(state: AppState, user: String, id: SavedQueryId) -> anyhow::Result<()> {
    state.repository.delete(&user, id).await?;
    Ok(())
}

pub async fn delete_saved_search(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<SavedQueryId>,
) -> Response {
    match _delete_saved_search(state, user, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete_saved_search", e),
    }
}
