use crate::handlers::{
    auth::{login, logout, me, register},
    favorites::{add_favorite, list_favorites, remove_favorite},
    games::list_games,
    health::health_check,
};
use crate::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    handler::Handler,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_routes(state: AppState) -> Router {
    let login_conf = rate_limit::create_login_config();

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route(
            "/login",
            post(login.layer(
                GovernorLayer::new(login_conf).error_handler(rate_limit::rejection),
            )),
        )
        .route("/logout", post(logout))
        .route("/me", get(me));

    let catalog_routes = Router::new()
        .route("/games", get(list_games))
        .route("/favorites", get(list_favorites))
        .route(
            "/favorites/{game_id}",
            post(add_favorite).delete(remove_favorite),
        );

    let api = Router::new()
        .nest("/auth", auth_routes)
        .merge(catalog_routes);

    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/v1", api)
        .layer(cors(&state.frontend_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The SPA sends the session cookie, so CORS has to name its exact origin.
fn cors(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(%frontend_url, error = %e, "invalid FRONTEND_URL, cross-origin requests disabled");
            layer
        }
    }
}
