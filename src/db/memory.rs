use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::{FavoriteRepository, GameRepository, Store, StoreError, UserRepository};
use crate::models::{
    game::{Game, GameFilter, GameListing, NewGame, PageRequest},
    user::{NewUser, User},
};

/// In-process store with the same semantics as the Postgres schema:
/// unique emails, unique (user, game) favorites, and a foreign key from
/// favorites to games.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    offline: AtomicBool,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    games: Vec<Game>,
    /// (favorite id, user id, game id); favorite ids grow with insertion.
    favorites: Vec<(i64, i64, i64)>,
    next_favorite_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the database went away.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Insert a game created `age_secs` before now. Larger ages sort later.
    pub fn insert_game_aged(&self, game: NewGame, age_secs: i64) -> Game {
        self.insert_game_at(game, Utc::now() - Duration::seconds(age_secs))
    }

    pub fn insert_game(&self, game: NewGame) -> Game {
        self.insert_game_at(game, Utc::now())
    }

    pub fn favorite_rows(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.favorites.len())
            .unwrap_or_default()
    }

    fn insert_game_at(&self, game: NewGame, created_at: DateTime<Utc>) -> Game {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let game = Game {
            id: inner.games.len() as i64 + 1,
            name: game.name,
            provider: game.provider,
            category: game.category,
            created_at,
        };
        inner.games.push(game.clone());
        game
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl Inner {
    fn is_favorite(&self, user_id: i64, game_id: i64) -> bool {
        self.favorites
            .iter()
            .any(|&(_, u, g)| u == user_id && g == game_id)
    }

    fn matching(&self, filter: &GameFilter, viewer: i64) -> Vec<&Game> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut games: Vec<&Game> = self
            .games
            .iter()
            .filter(|g| {
                filter
                    .provider
                    .as_ref()
                    .is_none_or(|p| g.provider.as_ref() == Some(p))
            })
            .filter(|g| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| g.category.as_ref() == Some(c))
            })
            .filter(|g| {
                needle
                    .as_ref()
                    .is_none_or(|n| g.name.to_lowercase().contains(n.as_str()))
            })
            .filter(|g| !filter.favorites_only || self.is_favorite(viewer, g.id))
            .collect();

        games.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        games
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }

        let created = User {
            id: inner.users.len() as i64 + 1,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl GameRepository for MemoryStore {
    async fn page(
        &self,
        filter: &GameFilter,
        viewer: i64,
        window: PageRequest,
    ) -> Result<Vec<GameListing>, StoreError> {
        let inner = self.lock()?;
        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.page_size()).unwrap_or_default();

        Ok(inner
            .matching(filter, viewer)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|g| GameListing {
                id: g.id,
                name: g.name.clone(),
                provider: g.provider.clone(),
                category: g.category.clone(),
                is_favorite: inner.is_favorite(viewer, g.id),
            })
            .collect())
    }

    async fn count(&self, filter: &GameFilter, viewer: i64) -> Result<i64, StoreError> {
        let inner = self.lock()?;
        Ok(inner.matching(filter, viewer).len() as i64)
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn add(&self, user_id: i64, game_id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.games.iter().any(|g| g.id == game_id) {
            return Err(StoreError::MissingReference);
        }
        if inner.is_favorite(user_id, game_id) {
            return Err(StoreError::Conflict);
        }

        inner.next_favorite_id += 1;
        let id = inner.next_favorite_id;
        inner.favorites.push((id, user_id, game_id));
        Ok(())
    }

    async fn remove(&self, user_id: i64, game_id: i64) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.favorites.len();
        inner
            .favorites
            .retain(|&(_, u, g)| !(u == user_id && g == game_id));
        Ok(inner.favorites.len() < before)
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Game>, StoreError> {
        let inner = self.lock()?;
        let mut rows: Vec<_> = inner
            .favorites
            .iter()
            .filter(|&&(_, u, _)| u == user_id)
            .collect();
        rows.sort_by_key(|&&(id, _, _)| id);

        Ok(rows
            .into_iter()
            .filter_map(|&(_, _, game_id)| inner.games.iter().find(|g| g.id == game_id).cloned())
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
