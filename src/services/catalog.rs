use std::sync::Arc;

use crate::db::GameRepository;
use crate::error::AppError;
use crate::models::game::{GameFilter, GamePage, PageRequest, Pagination};

#[derive(Clone)]
pub struct CatalogService {
    games: Arc<dyn GameRepository>,
}

impl CatalogService {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    /// One page of the filtered catalog plus totals over the whole filtered set.
    ///
    /// The page and the count are independent reads and run concurrently. If
    /// either fails the whole call fails.
    pub async fn list_games(
        &self,
        filter: &GameFilter,
        page: PageRequest,
        viewer: i64,
    ) -> Result<GamePage, AppError> {
        let (data, total) = tokio::try_join!(
            self.games.page(filter, viewer, page),
            self.games.count(filter, viewer),
        )
        .map_err(AppError::CatalogUnavailable)?;

        Ok(GamePage {
            pagination: Pagination::new(page, total),
            data,
        })
    }
}
