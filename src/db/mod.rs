//! Storage seam. Services talk to these traits; `PgStore` backs production and
//! `MemoryStore` backs the tests.

pub mod memory;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    game::{Game, GameFilter, GameListing, PageRequest},
    user::{NewUser, User},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated")]
    Conflict,

    /// A foreign key pointed at a row that does not exist.
    #[error("referenced row does not exist")]
    MissingReference,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            // Postgres: 23505 unique_violation, 23503 foreign_key_violation
            if db_err.code() == Some("23505".into()) {
                return StoreError::Conflict;
            }
            if db_err.code() == Some("23503".into()) {
                return StoreError::MissingReference;
            }
        }
        StoreError::Unavailable(e.to_string())
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// One page of matching games, newest first, annotated for `viewer`.
    async fn page(
        &self,
        filter: &GameFilter,
        viewer: i64,
        window: PageRequest,
    ) -> Result<Vec<GameListing>, StoreError>;

    /// Number of games matching `filter` for `viewer`, ignoring paging.
    async fn count(&self, filter: &GameFilter, viewer: i64) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// `Conflict` if the pair exists, `MissingReference` if the game does not.
    async fn add(&self, user_id: i64, game_id: i64) -> Result<(), StoreError>;
    /// Returns whether a row was deleted.
    async fn remove(&self, user_id: i64, game_id: i64) -> Result<bool, StoreError>;
    /// Favorited games in the order they were added.
    async fn list(&self, user_id: i64) -> Result<Vec<Game>, StoreError>;
}

/// Everything the application needs from its backing store.
#[async_trait]
pub trait Store: UserRepository + GameRepository + FavoriteRepository + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}
