use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{dto::NewFavorite, repo_types::Favorite};

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<Favorite>>;
    async fn create(&self, user_id: i32, fav: NewFavorite) -> anyhow::Result<Favorite>;
    /// Returns the rows removed; empty when nothing matched `id`.
    async fn delete(&self, id: i32) -> anyhow::Result<Vec<Favorite>>;
}

#[derive(Clone)]
pub struct PgFavoriteStore {
    db: PgPool,
}

impl PgFavoriteStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteStore for PgFavoriteStore {
    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, name, abv, ibu, style, image_url, user_id
            FROM favorites
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list favorites by user")?;
        Ok(rows)
    }

    async fn create(&self, user_id: i32, fav: NewFavorite) -> anyhow::Result<Favorite> {
        let row = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (name, abv, ibu, style, image_url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, abv, ibu, style, image_url, user_id
            "#,
        )
        .bind(fav.name)
        .bind(fav.abv)
        .bind(fav.ibu)
        .bind(fav.style)
        .bind(fav.image_url)
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .context("insert favorite")?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, Favorite>(
            r#"
            DELETE FROM favorites
            WHERE id = $1
            RETURNING id, name, abv, ibu, style, image_url, user_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await
        .context("delete favorite")?;
        Ok(rows)
    }
}

#[cfg(test)]
pub use memory::MemoryFavoriteStore;
