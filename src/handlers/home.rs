use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::database::models::{Author, Genre};
use crate::database::{CatalogStore, EntityStore};
use crate::error::AppError;
use crate::server::AppState;
use crate::views::Page;

/// GET / - record counts
pub async fn index<S: CatalogStore>(State(state): State<AppState<S>>) -> Result<Page, AppError> {
    let store = state.store.as_ref();
    let (authors, genres) = futures::try_join!(
        EntityStore::<Author>::count(store),
        EntityStore::<Genre>::count(store)
    )?;

    Ok(Page::new("index.html", "Local Library Home")
        .with("author_count", &authors)
        .with("genre_count", &genres))
}

/// GET /health - store connectivity
pub async fn health<S: CatalogStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
