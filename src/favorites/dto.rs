use serde::Deserialize;
use sqlx::types::Decimal;

/// Body of `POST /api/my/favorites`. Every field is optional and stored as sent;
/// `abv`/`ibu` take a JSON number or a numeric string, as the catalog returns them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFavorite {
    pub name: Option<String>,
    pub abv: Option<Decimal>,
    pub ibu: Option<Decimal>,
    pub style: Option<String>,
    pub image_url: Option<String>,
}
