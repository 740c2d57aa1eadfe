use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Book, CatalogEntity, EntityKind};
use crate::database::DatabaseError;
use crate::validation::{FieldError, FormInput};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl WorkflowError {
    pub fn not_found<E: CatalogEntity>(id: Uuid) -> Self {
        WorkflowError::NotFound { kind: E::KIND, id }
    }
}

/// Terminal state of a create or update submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<E> {
    /// Validation failed. `input` is the submission exactly as received.
    Rejected {
        input: FormInput,
        errors: Vec<FieldError>,
    },
    /// Another record already holds the unique key; nothing was written
    Existing(E),
    /// The draft was inserted or applied
    Persisted(E),
}

impl<E: CatalogEntity> Submission<E> {
    /// Where the client goes next, if anywhere
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            Submission::Rejected { .. } => None,
            Submission::Existing(entity) | Submission::Persisted(entity) => Some(entity.url()),
        }
    }
}

/// Result of asking to delete a record
#[derive(Debug, Clone, PartialEq)]
pub enum DeletePrompt<E> {
    /// Nothing to delete
    Missing,
    /// Show the record and the books that still reference it
    Confirm { entity: E, dependents: Vec<Book> },
}

/// Result of executing a delete
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteResult<E> {
    /// Already gone
    Missing,
    /// Books still reference the record; it was left in place
    Blocked { entity: E, dependents: Vec<Book> },
    Deleted,
}
