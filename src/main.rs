use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use posts_api::auth::JwtKeys;
use posts_api::config::{self, DEVELOPMENT_JWT_SECRET};
use posts_api::database::{DatabaseManager, MemoryPostRepository, PgPostRepository, PostRepository};
use posts_api::{app, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("posts_api=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Posts API in {:?} mode", config.environment);

    config.validate().map_err(anyhow::Error::msg)?;
    if config.security.jwt_secret == DEVELOPMENT_JWT_SECRET {
        tracing::warn!("JWT_SECRET not set, using the development secret");
    }

    let posts: Arc<dyn PostRepository> = match &config.database.url {
        Some(_) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool).await?;
            }
            Arc::new(PgPostRepository::new(pool))
        }
        None if is_production!() => {
            anyhow::bail!("DATABASE_URL is required in production");
        }
        None => {
            tracing::warn!("DATABASE_URL not set, posts are kept in memory only");
            Arc::new(MemoryPostRepository::new())
        }
    };

    let jwt = JwtKeys::from_config(&config.security)?;
    let app = app(AppState::new(posts, jwt), config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Posts API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
