use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use common::saved_query::SavedQueryList;
use serde::Deserialize;
use tracing::debug;

use super::{AppState, CurrentUser, error_response};

#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    pub page: String,
    #[serde(default)]
    pub shared: bool,
}

async fn _list_saved_searches(state: AppState, user: String, params: ListParams) -> anyhow::Result<SavedQueryList> {
    let items = state.repository.list(&user, &params.page, params.shared).await;
    debug!(user = %user, page = %params.page, count = items.len(), "listed saved searches");
    Ok(SavedQueryList { items })
}

pub async fn list_saved_searches(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListParams>,
) -> Response {
    match _list_saved_searches(state, user, params).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => error_response("list_saved_searches", e),
    }
}
