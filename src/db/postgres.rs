use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions};

use super::{FavoriteRepository, GameRepository, Store, StoreError, UserRepository};
use crate::models::{
    game::{Game, GameFilter, GameListing, NewGame, PageRequest},
    user::{NewUser, User},
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn game_count(&self) -> Result<i64, StoreError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM games")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Bulk insert used by the seed binary.
    pub async fn insert_games(&self, games: &[NewGame]) -> Result<u64, StoreError> {
        if games.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO games (name, provider, category) ");
        qb.push_values(games, |mut row, game| {
            row.push_bind(game.name.clone())
                .push_bind(game.provider.clone())
                .push_bind(game.category.clone());
        });

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Escape `%`, `_` and `\` so user input is matched literally inside ILIKE.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Appends the WHERE clause for `filter`. Shared by the page and count queries
/// so both always agree on the matching set.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &GameFilter, viewer: i64) {
    qb.push(" WHERE TRUE");

    if let Some(provider) = &filter.provider {
        qb.push(" AND g.provider = ").push_bind(provider.clone());
    }
    if let Some(category) = &filter.category {
        qb.push(" AND g.category = ").push_bind(category.clone());
    }
    if let Some(search) = &filter.search {
        qb.push(" AND g.name ILIKE ")
            .push_bind(like_pattern(search))
            .push(" ESCAPE '\\'");
    }
    if filter.favorites_only {
        qb.push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.game_id = g.id AND f.user_id = ")
            .push_bind(viewer)
            .push(")");
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl GameRepository for PgStore {
    async fn page(
        &self,
        filter: &GameFilter,
        viewer: i64,
        window: PageRequest,
    ) -> Result<Vec<GameListing>, StoreError> {
        // 1. Select the listing columns plus the viewer's favorite marker
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT g.id, g.name, g.provider, g.category, \
             EXISTS (SELECT 1 FROM favorites mine WHERE mine.game_id = g.id AND mine.user_id = ",
        );
        qb.push_bind(viewer);
        qb.push(") AS is_favorite FROM games g");
        // 2. Same WHERE clause as `count`
        push_filter(&mut qb, filter, viewer);

        // 3. Newest first, id breaks ties so pages never overlap
        qb.push(" ORDER BY g.created_at DESC, g.id DESC LIMIT ")
            .push_bind(window.page_size())
            .push(" OFFSET ")
            .push_bind(window.offset());

        Ok(qb
            .build_query_as::<GameListing>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count(&self, filter: &GameFilter, viewer: i64) -> Result<i64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM games g");
        push_filter(&mut qb, filter, viewer);

        Ok(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?)
    }
}

#[async_trait]
impl FavoriteRepository for PgStore {
    async fn add(&self, user_id: i64, game_id: i64) -> Result<(), StoreError> {
        // The UNIQUE(user_id, game_id) constraint decides concurrent adds.
        sqlx::query("INSERT INTO favorites (user_id, game_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(game_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, user_id: i64, game_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND game_id = $2")
            .bind(user_id)
            .bind(game_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Game>, StoreError> {
        Ok(sqlx::query_as::<_, Game>(
            r#"
            SELECT g.id, g.name, g.provider, g.category, g.created_at
            FROM favorites f
            JOIN games g ON g.id = f.game_id
            WHERE f.user_id = $1
            ORDER BY f.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
