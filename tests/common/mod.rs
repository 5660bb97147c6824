#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use posts_api::auth::JwtKeys;
use posts_api::config::AppConfig;
use posts_api::database::{MemoryPostRepository, PostRepository};
use posts_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub keys: JwtKeys,
    pub store: Arc<MemoryPostRepository>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Boot the router in-process on a free port, backed by a fresh memory store
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_store(Arc::new(MemoryPostRepository::new())).await
    }

    pub async fn spawn_with_store(store: Arc<MemoryPostRepository>) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_SECRET.to_string();
        config.api.enable_request_logging = false;

        let keys = JwtKeys::from_config(&config.security)?;
        let posts: Arc<dyn PostRepository> = store.clone();
        let router = app(AppState::new(posts, keys.clone()), &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            keys,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
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

    /// Bearer token for a test user
    pub fn token(&self) -> String {
        self.keys.issue(1, "tester").expect("issue test token")
    }

    /// Insert a post directly into the store, bypassing HTTP
    pub async fn seed_post(&self, title: &str) -> Result<posts_api::database::Post> {
        Ok(self.store.create(title).await?)
    }
}
