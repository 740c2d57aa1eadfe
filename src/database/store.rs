use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Author, Book, CatalogEntity, Genre, NewBook};

/// Persistence for one entity kind.
///
/// Every method is a single store round trip. Lookups that find nothing return
/// `Ok(None)` / `Ok(false)`; `Err` is reserved for backend failures.
#[async_trait]
pub trait EntityStore<E: CatalogEntity>: Send + Sync + 'static {
    /// All records, in the kind's display order
    async fn list(&self) -> Result<Vec<E>, DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, DatabaseError>;

    /// Exact match on the kind's unique key. Kinds without one never match.
    async fn find_by_key(&self, key: &str) -> Result<Option<E>, DatabaseError>;

    /// Persist a draft under a newly assigned id
    async fn insert(&self, draft: E::Draft) -> Result<E, DatabaseError>;

    /// Replace the fields of record `id`; `None` when it does not exist
    async fn update(&self, id: Uuid, draft: E::Draft) -> Result<Option<E>, DatabaseError>;

    /// Remove record `id`; `false` when it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Books that reference record `id`
    async fn dependents(&self, id: Uuid) -> Result<Vec<Book>, DatabaseError>;
}

/// Book fixtures. Books have no HTTP surface in this application; they are
/// managed directly to set up the references that guard deletes.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    async fn insert_book(&self, book: NewBook) -> Result<Book, DatabaseError>;

    async fn find_book(&self, id: Uuid) -> Result<Option<Book>, DatabaseError>;

    async fn delete_book(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Everything the catalog server needs from a backend
#[async_trait]
pub trait CatalogStore: EntityStore<Author> + EntityStore<Genre> + BookStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
