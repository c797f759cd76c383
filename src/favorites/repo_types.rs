use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Favorite record in the database. Display fields are a snapshot taken at
/// save time and never re-synced with GitHub.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub repo_id: i64, // GitHub repository id, unique per user
    pub repo_name: String,
    pub repo_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars_count: i32,
    pub created_at: OffsetDateTime,
}

/// Validated input for a new favorite, defaults already applied.
#[derive(Debug)]
pub struct NewFavorite {
    pub repo_id: i64,
    pub repo_name: String,
    pub repo_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars_count: i32,
}
