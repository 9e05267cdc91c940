use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::game::GamesQuery;
use crate::state::AppState;

/// Lists the catalog for the logged-in user.
///
/// Query parameters (all optional):
/// - provider / category: exact match
/// - search: case-insensitive substring of the game name
/// - favorites=true: only games this user has favorited
/// - page (default 1) and limit (default 10, max 50)
pub async fn list_games(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    query: Result<Query<GamesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let page = state
        .catalog
        .list_games(&query.filter(), query.page_request(), user.user_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "pagination": page.pagination,
        "data": page.data,
    })))
}
