use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::auth::password::HashCost;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Origin allowed to call the API with credentials (the SPA).
    pub frontend_url: String,
    /// Enables the `Secure` flag on the session cookie.
    pub production: bool,
    pub jwt_secret: String,
    pub hash_cost: HashCost,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            port: try_load("PORT", "3000")?,
            database_url,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            production,
            jwt_secret,
            hash_cost: HashCost {
                iterations: try_load("PASSWORD_HASH_ITERATIONS", "2")?,
                memory_kib: try_load("PASSWORD_HASH_MEMORY_KIB", "19456")?,
            },
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow::anyhow!("invalid value for {key}: {e}")
    })
}
