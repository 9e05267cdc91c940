use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;
/// Keeps `offset` comfortably inside `i64` for any accepted page.
pub const MAX_PAGE: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub provider: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalog entry as seen by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameListing {
    pub id: i64,
    pub name: String,
    pub provider: Option<String>,
    pub category: Option<String>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub provider: Option<String>,
    pub category: Option<String>,
}

impl NewGame {
    pub fn new(name: &str, provider: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            provider: Some(provider.to_string()),
            category: Some(category.to_string()),
        }
    }
}

/// Catalog filter. Every `Some` field narrows the result; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    /// Exact match.
    pub provider: Option<String>,
    /// Exact match.
    pub category: Option<String>,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    /// Only games the requesting user has favorited.
    pub favorites_only: bool,
}

/// Raw `/games` query string. Everything is a string so that garbage paging
/// values fall back to defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct GamesQuery {
    pub provider: Option<String>,
    pub category: Option<String>,
    pub favorites: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl GamesQuery {
    pub fn filter(&self) -> GameFilter {
        GameFilter {
            provider: non_blank(&self.provider),
            category: non_blank(&self.category),
            search: non_blank(&self.search),
            favorites_only: self.favorites.as_deref().map(str::trim) == Some("true"),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref())
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A validated page window: `page >= 1`, `1 <= page_size <= 50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Missing or non-numeric values use the defaults; numbers are clamped.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(
            parse(page).unwrap_or(1),
            parse(limit).unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let size = request.page_size();
        Self {
            page: request.page(),
            limit: size,
            total_items,
            total_pages: (total_items + size - 1) / size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePage {
    pub pagination: Pagination,
    pub data: Vec<GameListing>,
}
