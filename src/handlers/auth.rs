use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{LoginRequest, PublicUser, RegisterRequest};
use crate::state::AppState;

/// Creates the account and logs the new user straight in via the cookie.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let session = state.credentials.register(payload).await?;

    // Log the new user in right away: set the cookie, return the public fields only
    Ok((
        StatusCode::CREATED,
        state.cookies.issue(jar, session.token),
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "user": PublicUser::summary(&session.user),
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let session = state.credentials.login(payload).await?;

    // Re-issue the cookie even if the browser still holds a valid one
    Ok((
        StatusCode::OK,
        state.cookies.issue(jar, session.token),
        Json(json!({
            "success": true,
            "message": "User logged in successfully",
            "user": PublicUser::summary(&session.user),
        })),
    ))
}

/// Tokens are stateless, so logging out only clears the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::OK,
        state.cookies.revoke(jar),
        Json(json!({
            "success": true,
            "message": "User logged out successfully",
        })),
    )
}

/// Who is the cookie holder. Lets the frontend restore a session on reload.
pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.credentials.current_user(user.user_id).await?;

    Ok(Json(json!({
        "success": true,
        "user": PublicUser::profile(&profile),
    })))
}
