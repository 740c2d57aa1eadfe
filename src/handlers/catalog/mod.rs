pub mod delete;
pub mod read;
pub mod write;

// Re-export handler functions for use in routing
pub use delete::get as delete_get;
pub use delete::post as delete_post;

pub use read::detail;
pub use read::list;

pub use write::create_get;
pub use write::create_post;
pub use write::update_get;
pub use write::update_post;

use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Book, CatalogEntity};
use crate::error::AppError;
use crate::views::Page;

/// Path segment as a record id. Malformed ids never match a record.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

pub(crate) fn missing<E: CatalogEntity>() -> AppError {
    AppError::not_found(format!("{} not found", E::KIND.label()))
}

/// `Author Detail`, `Create Genre`, ...
pub(crate) fn title<E: CatalogEntity>(prefix: Option<&str>, suffix: Option<&str>) -> String {
    let label = E::KIND.label();
    match (prefix, suffix) {
        (Some(p), _) => format!("{} {}", p, label),
        (None, Some(s)) => format!("{} {}", label, s),
        (None, None) => label.to_string(),
    }
}

/// Page for `entity` with its referencing books under `{kind}` and `{kind}_books`
pub(crate) fn entity_page<E: CatalogEntity>(page: &str, title: &str, entity: &E, books: &[Book]) -> Page {
    let kind = E::KIND.as_str();
    let books: Vec<Value> = books.iter().map(Book::view).collect();

    Page::new(E::KIND.template(page), title)
        .with(kind, &entity.view())
        .with(&format!("{}_books", kind), &books)
}
