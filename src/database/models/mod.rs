pub mod author;
pub mod book;
pub mod genre;

pub use author::{Author, AuthorDraft};
pub use book::{Book, NewBook};
pub use genre::{Genre, GenreDraft};

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::validation::DraftForm;

/// The two entity kinds that share the create/update/delete workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Author,
    Genre,
}

impl EntityKind {
    /// Lowercase name used in paths, template names and context keys
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Genre => "genre",
        }
    }

    /// Human-readable name used in page titles
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Genre => "Genre",
        }
    }

    pub fn detail_path(&self, id: Uuid) -> String {
        format!("/{}/{}", self.as_str(), id)
    }

    pub fn list_path(&self) -> &'static str {
        match self {
            EntityKind::Author => "/authors",
            EntityKind::Genre => "/genres",
        }
    }

    /// Template file for a page of this kind, e.g. `author_form.html`
    pub fn template(&self, page: &str) -> String {
        format!("{}_{}.html", self.as_str(), page)
    }

    /// Form field carrying the record id on delete submissions
    pub fn delete_id_field(&self) -> &'static str {
        match self {
            EntityKind::Author => "authorid",
            EntityKind::Genre => "genreid",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted catalog record with a store-assigned id.
///
/// `Draft` is the validated payload a record is created or updated from; the id
/// is never part of it.
pub trait CatalogEntity: Clone + Send + Sync + 'static {
    type Draft: DraftForm + Clone + Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    /// Normalized key that must be unique across records of this kind, if any
    fn unique_key(_draft: &Self::Draft) -> Option<&str> {
        None
    }

    /// Template-facing representation, including derived fields such as `url`
    fn view(&self) -> Value;

    fn url(&self) -> String {
        Self::KIND.detail_path(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_paths_and_templates_from_kind() {
        let id = Uuid::nil();
        assert_eq!(
            EntityKind::Author.detail_path(id),
            "/author/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(EntityKind::Genre.list_path(), "/genres");
        assert_eq!(EntityKind::Genre.template("delete"), "genre_delete.html");
        assert_eq!(EntityKind::Author.delete_id_field(), "authorid");
    }
}
