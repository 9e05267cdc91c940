#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use casino_catalog::{
    auth::HashCost,
    config::AppConfig,
    db::MemoryStore,
    models::game::{Game, NewGame},
    routes,
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        database_url: String::new(),
        database_max_connections: 1,
        frontend_url: "http://localhost:5173".into(),
        production: false,
        jwt_secret: JWT_SECRET.into(),
        // Cheapest parameters argon2 accepts; keeps the suite fast.
        hash_cost: HashCost {
            iterations: 1,
            memory_kib: 8,
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), &test_config()).unwrap();
        Self {
            router: routes::create_routes(state),
            store,
        }
    }

    /// `count` games named "Game 01".. where a higher number means newer.
    pub fn with_numbered_games(count: usize) -> Self {
        let app = Self::new();
        for i in 1..=count {
            let provider = if i % 2 == 0 { "NetEnt" } else { "Evolution" };
            app.store.insert_game_aged(
                NewGame::new(&format!("Game {i:02}"), provider, "Slots"),
                (count - i) as i64,
            );
        }
        app
    }

    pub fn insert_game(&self, name: &str, provider: &str, category: &str, age_secs: i64) -> Game {
        self.store
            .insert_game_aged(NewGame::new(name, provider, category), age_secs)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn authed(&self, method: Method, uri: &str, cookie: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, cookie: &str) -> TestResponse {
        self.authed(Method::GET, uri, cookie).await
    }

    /// Register a user and return the `token=...` cookie pair.
    pub async fn register(&self, username: &str, email: &str) -> String {
        let response = self
            .post_json(
                "/api/v1/auth/register",
                json!({"username": username, "email": email, "password": "correct-horse"}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.session_cookie().expect("register sets a cookie")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Just `token=value`, ready for a `Cookie` request header.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|c| c.split(';').next().map(str::to_string))
    }

    pub fn names(&self) -> Vec<String> {
        self.body["data"]
            .as_array()
            .map(|games| {
                games
                    .iter()
                    .filter_map(|g| g["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
