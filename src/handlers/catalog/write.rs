use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

use crate::database::models::CatalogEntity;
use crate::database::EntityStore;
use crate::error::AppError;
use crate::server::AppState;
use crate::validation::FormInput;
use crate::views::Page;
use crate::workflow::{EntityWorkflow, Submission};

use super::{missing, parse_id, title};

/// GET /author/create, /genre/create - empty form
pub async fn create_get<E: CatalogEntity>() -> Page {
    Page::new(E::KIND.template("form"), &title::<E>(Some("Create"), None))
}

/// POST /author/create, /genre/create
pub async fn create_post<E, S>(
    State(state): State<AppState<S>>,
    Form(input): Form<FormInput>,
) -> Result<Response, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let submission = EntityWorkflow::<E, S>::new(&state.store).create(input).await?;
    Ok(respond(submission, &title::<E>(Some("Create"), None)))
}

/// GET /author/:id/update, /genre/:id/update - form prefilled from the record
pub async fn update_get<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Page, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let id = parse_id(&id).ok_or_else(missing::<E>)?;
    let entity = EntityWorkflow::<E, S>::new(&state.store).find(id).await?;

    Ok(Page::new(E::KIND.template("form"), &title::<E>(Some("Update"), None))
        .with(E::KIND.as_str(), &entity.view()))
}

/// POST /author/:id/update, /genre/:id/update
///
/// The record id comes from the path; any `id` field in the body is ignored.
pub async fn update_post<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Form(input): Form<FormInput>,
) -> Result<Response, AppError>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    let id = parse_id(&id).ok_or_else(missing::<E>)?;
    let submission = EntityWorkflow::<E, S>::new(&state.store).update(id, input).await?;
    Ok(respond(submission, &title::<E>(Some("Update"), None)))
}

/// Redirect to the resolved record, or re-render the form with the submitted
/// values and every validation error
fn respond<E: CatalogEntity>(submission: Submission<E>, title: &str) -> Response {
    match submission {
        Submission::Rejected { input, errors } => Page::new(E::KIND.template("form"), title)
            .with(E::KIND.as_str(), &input)
            .with("errors", &errors)
            .into_response(),
        Submission::Existing(entity) | Submission::Persisted(entity) => {
            Redirect::to(&entity.url()).into_response()
        }
    }
}
