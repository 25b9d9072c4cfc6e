use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::IgnoredAny;
use tracing::debug;

use crate::config::BeerApiConfig;

#[async_trait]
pub trait BeerCatalog: Send + Sync {
    /// Runs a beer search upstream and hands back its JSON body byte for byte.
    async fn search(&self, term: &str) -> anyhow::Result<Bytes>;
}

/// BreweryDB `/search` endpoint.
#[derive(Clone)]
pub struct BreweryDbClient {
    http: reqwest::Client,
    url: String,
    key: String,
}

impl BreweryDbClient {
    pub fn new(cfg: &BeerApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            url: cfg.url.clone(),
            key: cfg.key.clone(),
        })
    }
}

#[async_trait]
impl BeerCatalog for BreweryDbClient {
    async fn search(&self, term: &str) -> anyhow::Result<Bytes> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("key", self.key.as_str()), ("type", "beer"), ("q", term)])
            .send()
            .await
            .context("brewerydb request")?
            .error_for_status()
            .context("brewerydb status")?;
        let body = res.bytes().await.context("brewerydb body")?;
        // Only checked, never re-encoded, so key order and number text survive.
        serde_json::from_slice::<IgnoredAny>(&body).context("brewerydb body is not json")?;
        debug!(term, len = body.len(), "brewerydb search ok");
        Ok(body)
    }
}

#[cfg(test)]
pub use stub::StubCatalog;


#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, sync::Arc};

    use axum::{
        extract::{RawQuery, State},
        http::{header, StatusCode},
        routing::get,
        Router,
    };
    use tokio::{net::TcpListener, sync::Mutex};

    use super::*;

    const UPSTREAM_BODY: &str =
        r#"{"status":"success","currentPage":1,"data":[{"name":"X","abv":"5.20"}],"numberOfPages":1}"#;

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn upstream() -> (SocketAddr, Seen) {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route(
                "/search",
                get(|State(seen): State<Seen>, RawQuery(q): RawQuery| async move {
                    seen.lock().await.push(q.unwrap_or_default());
                    ([(header::CONTENT_TYPE, "application/json")], UPSTREAM_BODY)
                }),
            )
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/html", get(|| async { "<html>maintenance</html>" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    "{}"
                }),
            )
            .with_state(seen.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (addr, seen)
    }

    fn client(addr: SocketAddr, path: &str) -> BreweryDbClient {
        BreweryDbClient::new(&BeerApiConfig {
            url: format!("http://{addr}{path}"),
            key: "k3y".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn sends_encoded_query_and_returns_body_verbatim() {
        let (addr, seen) = upstream().await;
        let body = client(addr, "/search").search("hazy ipa & more").await.unwrap();

        assert_eq!(&body[..], UPSTREAM_BODY.as_bytes());
        assert_eq!(
            *seen.lock().await,
            vec!["key=k3y&type=beer&q=hazy+ipa+%26+more".to_string()]
        );
    }

    #[tokio::test]
    async fn server_error_is_an_error() {
        let (addr, _) = upstream().await;
        assert!(client(addr, "/broken").search("stout").await.is_err());
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let (addr, _) = upstream().await;
        let err = client(addr, "/html").search("stout").await.unwrap_err();
        assert!(format!("{err:#}").contains("not json"));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let (addr, _) = upstream().await;
        assert!(client(addr, "/slow").search("stout").await.is_err());
    }
}
