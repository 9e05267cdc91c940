use std::sync::Arc;

use crate::auth::{PasswordHasher, SessionCookies, TokenIssuer};
use crate::config::AppConfig;
use crate::db::Store;
use crate::services::{CatalogService, CredentialService, FavoritesLedger};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub credentials: Arc<CredentialService>,
    pub catalog: CatalogService,
    pub favorites: FavoritesLedger,
    pub cookies: SessionCookies,
    pub frontend_url: String,
}

impl AppState {
    /// Wire every service to the same store.
    pub fn new<S: Store>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(config.hash_cost)?;
        let tokens = TokenIssuer::new(&config.jwt_secret);

        Ok(Self {
            credentials: Arc::new(CredentialService::new(store.clone(), hasher, tokens)),
            catalog: CatalogService::new(store.clone()),
            favorites: FavoritesLedger::new(store.clone()),
            store,
            cookies: SessionCookies {
                secure: config.production,
            },
            frontend_url: config.frontend_url.clone(),
        })
    }
}
