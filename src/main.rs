use casino_catalog::{config::AppConfig, db::PgStore, routes, state::AppState};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silently ignored when there is no .env file.
    dotenvy::dotenv().ok();

    // Error reporting is off unless SENTRY_DSN is set. Keep the guard alive.
    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            traces_sample_rate: 1.0,
            ..Default::default()
        },
    ));

    // Must happen before the first TLS connection (the database).
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    // Log to stdout and forward errors to Sentry
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casino_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    tracing::info!("Starting casino catalog API...");

    // Load config from the environment, falling back to local defaults
    let config = AppConfig::from_env()?;

    // Applies pending migrations before serving anything.
    let store = PgStore::connect(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Connected to PostgreSQL");

    // Wire services and routes
    let state = AppState::new(Arc::new(store), &config)?;
    let app = routes::create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
