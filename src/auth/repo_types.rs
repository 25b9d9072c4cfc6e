use serde::Serialize;
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash: String, // Argon2 PHC string, not exposed in JSON
}
