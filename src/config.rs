use anyhow::Context;
use serde::Deserialize;

const DEFAULT_BEER_API_URL: &str = "https://sandbox-api.brewerydb.com/v2/search";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BeerApiConfig {
    pub url: String,
    pub key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub beer_api: BeerApiConfig,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: get("JWT_ISSUER").unwrap_or_else(|| "brewlist".into()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| "brewlist-users".into()),
            ttl_minutes: parsed(get("JWT_TTL_MINUTES")).unwrap_or(60 * 24),
        };
        let beer_api = BeerApiConfig {
            url: get("BEER_API_URL").unwrap_or_else(|| DEFAULT_BEER_API_URL.into()),
            key: required("API_KEY")?,
            timeout_secs: parsed(get("BEER_API_TIMEOUT_SECS")).unwrap_or(10),
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed(get("PORT")).unwrap_or(8080),
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed(get("DB_MAX_CONNECTIONS")).unwrap_or(10),
            jwt,
            beer_api,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "public".into()),
        })
    }
}

fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.parse().ok())
}
