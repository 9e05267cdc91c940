use std::sync::Arc;

use crate::db::{FavoriteRepository, StoreError};
use crate::error::AppError;
use crate::models::game::Game;

/// User ⇄ game bookmarks.
#[derive(Clone)]
pub struct FavoritesLedger {
    favorites: Arc<dyn FavoriteRepository>,
}

impl FavoritesLedger {
    pub fn new(favorites: Arc<dyn FavoriteRepository>) -> Self {
        Self { favorites }
    }

    /// A second add of the same pair is an error, never a silent no-op.
    pub async fn add(&self, user_id: i64, game_id: i64) -> Result<(), AppError> {
        self.favorites
            .add(user_id, game_id)
            .await
            .map_err(|e| match e {
                StoreError::Conflict => AppError::AlreadyFavorited,
                StoreError::MissingReference => AppError::NotFound("Game not found".to_string()),
                other => AppError::Storage(other),
            })
    }

    pub async fn remove(&self, user_id: i64, game_id: i64) -> Result<(), AppError> {
        if self.favorites.remove(user_id, game_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFavorited)
        }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Game>, AppError> {
        Ok(self.favorites.list(user_id).await?)
    }
}
