//! Create, update and delete workflows shared by every entity kind.
//!
//! A submission is validated, checked against the kind's unique key, and then
//! either rejected, resolved to the record that already exists, or persisted.
//! Deletes are re-checked against dependent books at execution time, never
//! trusted from the confirmation step.

pub mod outcome;

pub use outcome::{DeletePrompt, DeleteResult, Submission, WorkflowError};

use std::marker::PhantomData;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::models::{Book, CatalogEntity};
use crate::database::EntityStore;
use crate::validation::{DraftForm, FieldError, FormInput, Validated};

/// Workflow controller for entity kind `E` over store `S`
pub struct EntityWorkflow<'s, E, S> {
    store: &'s S,
    _kind: PhantomData<fn() -> E>,
}

impl<'s, E, S> EntityWorkflow<'s, E, S>
where
    E: CatalogEntity,
    S: EntityStore<E>,
{
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<E>, WorkflowError> {
        Ok(self.store.list().await?)
    }

    /// Record by id, or `NotFound`
    pub async fn find(&self, id: Uuid) -> Result<E, WorkflowError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| WorkflowError::not_found::<E>(id))
    }

    /// Record and the books that reference it, or `NotFound`
    pub async fn detail(&self, id: Uuid) -> Result<(E, Vec<Book>), WorkflowError> {
        match self.load_with_dependents(id).await? {
            (Some(entity), books) => Ok((entity, books)),
            (None, _) => Err(WorkflowError::not_found::<E>(id)),
        }
    }

    pub async fn create(&self, input: FormInput) -> Result<Submission<E>, WorkflowError> {
        let draft = match <E::Draft as DraftForm>::validate(&input) {
            Validated::Valid(draft) => draft,
            Validated::Invalid(errors) => return Ok(self.reject(input, errors)),
        };

        if let Some(existing) = self.find_conflict(&draft, None).await? {
            info!(kind = %E::KIND, id = %existing.id(), "create resolved to existing record");
            return Ok(Submission::Existing(existing));
        }

        let entity = self.store.insert(draft).await?;
        info!(kind = %E::KIND, id = %entity.id(), "record created");
        Ok(Submission::Persisted(entity))
    }

    /// Apply a submission to record `id`. The id always comes from the caller,
    /// never from the submitted fields.
    pub async fn update(&self, id: Uuid, input: FormInput) -> Result<Submission<E>, WorkflowError> {
        let draft = match <E::Draft as DraftForm>::validate(&input) {
            Validated::Valid(draft) => draft,
            Validated::Invalid(errors) => return Ok(self.reject(input, errors)),
        };

        if let Some(existing) = self.find_conflict(&draft, Some(id)).await? {
            info!(
                kind = %E::KIND,
                id = %id,
                existing = %existing.id(),
                "update resolved to existing record"
            );
            return Ok(Submission::Existing(existing));
        }

        match self.store.update(id, draft).await? {
            Some(entity) => {
                info!(kind = %E::KIND, id = %id, "record updated");
                Ok(Submission::Persisted(entity))
            }
            None => Err(WorkflowError::not_found::<E>(id)),
        }
    }

    pub async fn delete_confirm(&self, id: Uuid) -> Result<DeletePrompt<E>, WorkflowError> {
        match self.load_with_dependents(id).await? {
            (Some(entity), dependents) => Ok(DeletePrompt::Confirm { entity, dependents }),
            (None, _) => Ok(DeletePrompt::Missing),
        }
    }

    pub async fn delete_execute(&self, id: Uuid) -> Result<DeleteResult<E>, WorkflowError> {
        let (entity, dependents) = match self.load_with_dependents(id).await? {
            (Some(entity), dependents) => (entity, dependents),
            (None, _) => {
                debug!(kind = %E::KIND, id = %id, "delete of missing record");
                return Ok(DeleteResult::Missing);
            }
        };

        if !dependents.is_empty() {
            warn!(
                kind = %E::KIND,
                id = %id,
                dependents = dependents.len(),
                "delete blocked by referencing books"
            );
            return Ok(DeleteResult::Blocked { entity, dependents });
        }

        if self.store.delete(id).await? {
            info!(kind = %E::KIND, id = %id, "record deleted");
        }
        Ok(DeleteResult::Deleted)
    }

    fn reject(&self, input: FormInput, errors: Vec<FieldError>) -> Submission<E> {
        debug!(kind = %E::KIND, errors = errors.len(), "submission rejected");
        Submission::Rejected { input, errors }
    }

    /// A different record already holding the draft's unique key
    async fn find_conflict(&self, draft: &E::Draft, own_id: Option<Uuid>) -> Result<Option<E>, WorkflowError> {
        let Some(key) = E::unique_key(draft) else {
            return Ok(None);
        };

        let found = self.store.find_by_key(key).await?;
        Ok(found.filter(|existing| Some(existing.id()) != own_id))
    }

    /// Entity and its dependents, fetched concurrently
    async fn load_with_dependents(&self, id: Uuid) -> Result<(Option<E>, Vec<Book>), WorkflowError> {
        let (entity, dependents) =
            futures::try_join!(self.store.find_by_id(id), self.store.dependents(id))?;
        Ok((entity, dependents))
    }
}
