use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

use crate::database::models::CatalogEntity;
use crate::database::EntityStore;
use crate::error::AppError;
use crate::server::AppState;
use crate::validation::FormInput;
use crate::workflow::{DeletePrompt, DeleteResult, EntityWorkflow};

use super::{entity_page, parse_id, title};

/// GET /author/:id/delete, /genre/:id/delete - confirmation page, or back to
/// the list when there is nothing to delete
pub async fn get<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let Some(id) = parse_id(&id) else {
        return Ok(back_to_list::<E>());
    };

    match EntityWorkflow::<E, S>::new(&state.store).delete_confirm(id).await? {
        DeletePrompt::Missing => Ok(back_to_list::<E>()),
        DeletePrompt::Confirm { entity, dependents } => {
            Ok(entity_page("delete", &title::<E>(Some("Delete"), None), &entity, &dependents)
                .into_response())
        }
    }
}

/// POST /author/:id/delete, /genre/:id/delete
///
/// The id is read from the `authorid`/`genreid` body field, falling back to
/// the path. Dependents are checked again here; a blocked delete re-renders
/// the confirmation page.
pub async fn post<E, S>(
    State(state): State<AppState<S>>,
    Path(path_id): Path<String>,
    Form(input): Form<FormInput>,
) -> Result<Response, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let raw = input
        .get(E::KIND.delete_id_field())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(path_id.as_str());
    let Some(id) = parse_id(raw) else {
        return Ok(back_to_list::<E>());
    };

    match EntityWorkflow::<E, S>::new(&state.store).delete_execute(id).await? {
        DeleteResult::Missing | DeleteResult::Deleted => Ok(back_to_list::<E>()),
        DeleteResult::Blocked { entity, dependents } => {
            Ok(entity_page("delete", &title::<E>(Some("Delete"), None), &entity, &dependents)
                .into_response())
        }
    }
}

fn back_to_list<E: CatalogEntity>() -> Response {
    Redirect::to(E::KIND.list_path()).into_response()
}
