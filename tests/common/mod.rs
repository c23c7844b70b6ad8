#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use newsroom_api::auth::JwtKeys;
use newsroom_api::config::AppConfig;
use newsroom_api::state::AppState;
use newsroom_api::store::MemoryStore;

pub const PASSWORD: &str = "correct-horse";

/// Router served in-process over a fresh in-memory store
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::development()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let keys = JwtKeys::from_config(&config.security)?;
        let state = AppState::new(Arc::new(MemoryStore::new()), keys, &config);
        let app = newsroom_api::app(state, &config);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a user and return a bearer token for it
    pub async fn login_as(&self, email: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self
            .client
            .post(self.url("/auth/jwt/login"))
            .form(&[("username", email), ("password", PASSWORD)])
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body: Value = res.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("token response without access_token")
    }

    pub async fn create_category(&self, name: &str) -> Result<i64> {
        let res = self
            .client
            .post(self.url("/categories"))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create category failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("category without id")
    }

    /// Create news and return its id, found through the list projection
    pub async fn create_news(&self, title: &str, category_id: Option<i64>) -> Result<i64> {
        let res = self
            .client
            .post(self.url("/news"))
            .json(&json!({
                "title": title,
                "content": "body",
                "images": [],
                "category_id": category_id
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create news failed: {}", res.status());

        let list: Vec<Value> = self
            .client
            .get(self.url("/news?limit=100"))
            .send()
            .await?
            .json()
            .await?;
        list.iter()
            .rev()
            .find(|item| item["title"] == title)
            .and_then(|item| item["id"].as_i64())
            .context("created news missing from list")
    }
}
