use axum::{extract::FromRequestParts, http::{StatusCode, request::Parts}};

use super::AppState;

/// Caller id taken from the configured user header.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub String);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(state.user_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| CurrentUser(value.to_string()))
            .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("missing {} header", state.user_header)))
    }
}
