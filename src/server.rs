use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::database::models::{Author, Genre};
use crate::database::{CatalogStore, DatabaseManager, MemoryStore, PgStore};
use crate::handlers::{self, catalog};

/// Shared request state
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

// Manual impl: S itself need not be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

pub fn router<S: CatalogStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::index::<S>))
        .route("/health", get(handlers::health::<S>))
        .merge(author_routes::<S>())
        .merge(genre_routes::<S>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn author_routes<S: CatalogStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/authors", get(catalog::list::<Author, S>))
        .route(
            "/author/create",
            get(catalog::create_get::<Author>).post(catalog::create_post::<Author, S>),
        )
        .route("/author/:id", get(catalog::detail::<Author, S>))
        .route(
            "/author/:id/update",
            get(catalog::update_get::<Author, S>).post(catalog::update_post::<Author, S>),
        )
        .route(
            "/author/:id/delete",
            get(catalog::delete_get::<Author, S>).post(catalog::delete_post::<Author, S>),
        )
}

fn genre_routes<S: CatalogStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/genres", get(catalog::list::<Genre, S>))
        .route(
            "/genre/create",
            get(catalog::create_get::<Genre>).post(catalog::create_post::<Genre, S>),
        )
        .route("/genre/:id", get(catalog::detail::<Genre, S>))
        .route(
            "/genre/:id/update",
            get(catalog::update_get::<Genre, S>).post(catalog::update_post::<Genre, S>),
        )
        .route(
            "/genre/:id/delete",
            get(catalog::delete_get::<Genre, S>).post(catalog::delete_post::<Genre, S>),
        )
}

/// Build the configured store and serve until the process is stopped
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    match config.server.store {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            serve(config, MemoryStore::new()).await
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database).await?;
            serve(config, PgStore::new(pool)).await
        }
    }
}

pub async fn serve<S: CatalogStore>(config: &AppConfig, store: S) -> anyhow::Result<()> {
    let app = router(AppState::new(store));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    info!("Library catalog listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
