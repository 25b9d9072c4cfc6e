use serde::Serialize;
use sqlx::{types::Decimal, FromRow};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Favorite {
    pub id: i32,
    pub name: Option<String>,
    pub abv: Option<Decimal>,
    pub ibu: Option<Decimal>,
    pub style: Option<String>,
    pub image_url: Option<String>,
    pub user_id: i32,
}
