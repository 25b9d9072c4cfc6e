use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Inserts a user; `None` means the email was already taken.
    async fn create(&self, email: &str, hash: &str) -> anyhow::Result<Option<User>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("select user by email")?;
        Ok(user)
    }

    async fn create(&self, email: &str, hash: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, hash
            "#,
        )
        .bind(email)
        .bind(hash)
        .fetch_optional(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}

#[cfg(test)]
pub use memory::MemoryUserStore;

#[cfg(test)]
mod memory {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            let users = self.users.lock().await;
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn create(&self, email: &str, hash: &str) -> anyhow::Result<Option<User>> {
            let mut users = self.users.lock().await;
            if users.iter().any(|u| u.email == email) {
                return Ok(None);
            }
            let user = User {
                id: users.len() as i32 + 1,
                email: email.to_string(),
                hash: hash.to_string(),
            };
            users.push(user.clone());
            Ok(Some(user))
        }
    }
}
