//! Loads the starter game catalog into an empty database.

use anyhow::Context;
use casino_catalog::db::{PgStore, seed::starter_catalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,casino_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let store = PgStore::connect(&url, 1).await?;

    let existing = store.game_count().await?;
    if existing > 0 {
        tracing::info!(existing, "games table already populated, nothing to do");
        return Ok(());
    }

    let inserted = store.insert_games(&starter_catalog()).await?;
    tracing::info!(inserted, "casino games seeded");

    Ok(())
}
