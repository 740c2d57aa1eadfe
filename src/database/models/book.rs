use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// A book references one author and any number of genres. Books are the
/// dependents that block author and genre deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    pub genre_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn from_new(id: Uuid, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            summary: new.summary,
            isbn: new.isbn,
            author_id: new.author_id,
            genre_ids: new.genre_ids,
        }
    }

    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "summary": self.summary,
            "isbn": self.isbn,
        })
    }
}
