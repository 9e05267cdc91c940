//! REST backend for a casino game catalog: cookie-session auth, a filtered and
//! paginated game listing, and per-user favorites.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
