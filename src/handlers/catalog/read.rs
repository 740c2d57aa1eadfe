use axum::extract::{Path, State};
use serde_json::Value;

use crate::database::models::CatalogEntity;
use crate::database::EntityStore;
use crate::error::AppError;
use crate::server::AppState;
use crate::views::Page;
use crate::workflow::EntityWorkflow;

use super::{entity_page, missing, parse_id, title};

/// GET /authors, /genres - every record of the kind, sorted
pub async fn list<E, S>(State(state): State<AppState<S>>) -> Result<Page, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let records = EntityWorkflow::<E, S>::new(&state.store).list().await?;
    let views: Vec<Value> = records.iter().map(|r| r.view()).collect();

    Ok(Page::new(E::KIND.template("list"), &title::<E>(None, Some("List")))
        .with(&format!("{}_list", E::KIND.as_str()), &views))
}

/// GET /author/:id, /genre/:id - one record and the books referencing it
pub async fn detail<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Page, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let id = parse_id(&id).ok_or_else(missing::<E>)?;
    let (entity, books) = EntityWorkflow::<E, S>::new(&state.store).detail(id).await?;

    Ok(entity_page(
        "detail",
        &title::<E>(None, Some("Detail")),
        &entity,
        &books,
    ))
}
