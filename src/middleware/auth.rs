use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::SessionCookies;
use crate::error::AppError;
use crate::state::AppState;

/// The caller's identity, proven by the `token` cookie.
///
/// Add `user: AuthenticatedUser` to a handler and the request is rejected with
/// 401 before the handler runs if the cookie is missing, tampered with or expired.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user_id = state
            .credentials
            .verify_token(SessionCookies::token(&jar))?;

        Ok(AuthenticatedUser { user_id })
    }
}
