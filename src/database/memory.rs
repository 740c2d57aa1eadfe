use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Author, AuthorDraft, Book, Genre, GenreDraft, NewBook};
use crate::database::store::{BookStore, CatalogStore, EntityStore};

/// In-process catalog store.
///
/// Mirrors the Postgres store's ordering and reference rules: books must point
/// at existing authors and genres, and a referenced author or genre cannot be
/// removed.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    authors: HashMap<Uuid, Author>,
    genres: HashMap<Uuid, Genre>,
    books: HashMap<Uuid, Book>,
}

impl Tables {
    fn books_where(&self, pred: impl Fn(&Book) -> bool) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.values().filter(|b| pred(b)).cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        books
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore<Author> for MemoryStore {
    async fn list(&self) -> Result<Vec<Author>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, DatabaseError> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn find_by_key(&self, _key: &str) -> Result<Option<Author>, DatabaseError> {
        Ok(None)
    }

    async fn insert(&self, draft: AuthorDraft) -> Result<Author, DatabaseError> {
        let author = Author::from_draft(Uuid::new_v4(), draft);
        self.tables
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn update(&self, id: Uuid, draft: AuthorDraft) -> Result<Option<Author>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.authors.get_mut(&id).map(|slot| {
            *slot = Author::from_draft(id, draft);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.books.values().any(|b| b.author_id == id) {
            return Err(DatabaseError::QueryError(format!(
                "author {} is still referenced by books",
                id
            )));
        }
        Ok(tables.authors.remove(&id).is_some())
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Book>, DatabaseError> {
        Ok(self.tables.read().await.books_where(|b| b.author_id == id))
    }
}

#[async_trait]
impl EntityStore<Genre> for MemoryStore {
    async fn list(&self) -> Result<Vec<Genre>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut genres: Vec<Genre> = tables.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        Ok(self.tables.read().await.genres.len() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>, DatabaseError> {
        Ok(self.tables.read().await.genres.get(&id).cloned())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Genre>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .genres
            .values()
            .filter(|g| g.name == key)
            .min_by_key(|g| g.id)
            .cloned())
    }

    async fn insert(&self, draft: GenreDraft) -> Result<Genre, DatabaseError> {
        let genre = Genre::from_draft(Uuid::new_v4(), draft);
        self.tables
            .write()
            .await
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update(&self, id: Uuid, draft: GenreDraft) -> Result<Option<Genre>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.get_mut(&id).map(|slot| {
            *slot = Genre::from_draft(id, draft);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.books.values().any(|b| b.genre_ids.contains(&id)) {
            return Err(DatabaseError::QueryError(format!(
                "genre {} is still referenced by books",
                id
            )));
        }
        Ok(tables.genres.remove(&id).is_some())
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Book>, DatabaseError> {
        Ok(self
            .tables
            .read()
            .await
            .books_where(|b| b.genre_ids.contains(&id)))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn insert_book(&self, book: NewBook) -> Result<Book, DatabaseError> {
        let mut tables = self.tables.write().await;

        if !tables.authors.contains_key(&book.author_id) {
            return Err(DatabaseError::QueryError(format!(
                "book references unknown author {}",
                book.author_id
            )));
        }
        if let Some(missing) = book.genre_ids.iter().find(|g| !tables.genres.contains_key(*g)) {
            return Err(DatabaseError::QueryError(format!(
                "book references unknown genre {}",
                missing
            )));
        }

        let book = Book::from_new(Uuid::new_v4(), book);
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_book(&self, id: Uuid) -> Result<Option<Book>, DatabaseError> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn delete_book(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.books.remove(&id).is_some())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first: &str, family: &str) -> AuthorDraft {
        AuthorDraft {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[tokio::test]
    async fn lists_authors_by_family_name() {
        let store = MemoryStore::new();
        for (first, family) in [("Isaac", "Asimov"), ("Ben", "Bova"), ("Ann", "Asimov")] {
            EntityStore::<Author>::insert(&store, draft(first, family)).await.unwrap();
        }

        let names: Vec<String> = EntityStore::<Author>::list(&store)
            .await
            .unwrap()
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, vec!["Asimov, Ann", "Asimov, Isaac", "Bova, Ben"]);
    }

    #[tokio::test]
    async fn genre_key_lookup_is_exact() {
        let store = MemoryStore::new();
        let fantasy = EntityStore::<Genre>::insert(&store, GenreDraft { name: "Fantasy".into() })
            .await
            .unwrap();

        let hit = EntityStore::<Genre>::find_by_key(&store, "Fantasy").await.unwrap();
        assert_eq!(hit, Some(fantasy));
        let miss = EntityStore::<Genre>::find_by_key(&store, "fantasy").await.unwrap();
        assert_eq!(miss, None);
    }

    #[tokio::test]
    async fn books_must_reference_existing_records() {
        let store = MemoryStore::new();
        let result = store
            .insert_book(NewBook {
                title: "Orphan".into(),
                summary: String::new(),
                isbn: "0".into(),
                author_id: Uuid::new_v4(),
                genre_ids: vec![],
            })
            .await;
        assert!(matches!(result, Err(DatabaseError::QueryError(_))));
    }

    #[tokio::test]
    async fn update_of_missing_record_returns_none() {
        let store = MemoryStore::new();
        let updated = EntityStore::<Author>::update(&store, Uuid::new_v4(), draft("A", "B"))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert_eq!(EntityStore::<Author>::count(&store).await.unwrap(), 0);
    }
}
