use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;

fn parse_game_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation("Invalid game id".to_string()))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let game_id = parse_game_id(&game_id)?;
    state.favorites.add(user.user_id, game_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Added to favorites"})),
    ))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let game_id = parse_game_id(&game_id)?;
    state.favorites.remove(user.user_id, game_id).await?;

    Ok(Json(
        json!({"success": true, "message": "Removed from favorites"}),
    ))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let games = state.favorites.list(user.user_id).await?;

    Ok(Json(json!({"success": true, "data": games})))
}
