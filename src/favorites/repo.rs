pub use crate::favorites::repo_types::{Favorite, NewFavorite};
use sqlx::PgPool;
use uuid::Uuid;

impl Favorite {
    /// All favorites owned by the user, store-native order.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, repo_id, repo_name, repo_url,
                   description, language, stars_count, created_at
            FROM favorites
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Insert a favorite for the user. The (user_id, repo_id) unique
    /// constraint rejects duplicates at the store level.
    pub async fn create(db: &PgPool, user_id: Uuid, new: &NewFavorite) -> anyhow::Result<Favorite> {
        let row = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites
                (user_id, repo_id, repo_name, repo_url, description, language, stars_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, repo_id, repo_name, repo_url,
                      description, language, stars_count, created_at
            "#,
        )
        .bind(user_id)
        .bind(new.repo_id)
        .bind(&new.repo_name)
        .bind(&new.repo_url)
        .bind(&new.description)
        .bind(&new.language)
        .bind(new.stars_count)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Delete a favorite by id, scoped to its owner. A favorite that exists
    /// but belongs to another user counts as not found.
    pub async fn delete_by_user(
        db: &PgPool,
        user_id: Uuid,
        favorite_id: Uuid,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(favorite_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
