use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Author, AuthorDraft, Book, Genre, GenreDraft, NewBook};
use crate::database::store::{BookStore, CatalogStore, EntityStore};

/// Catalog store backed by Postgres
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BOOK_SELECT: &str = r#"
    SELECT b.id, b.title, b.summary, b.isbn, b.author_id,
           ARRAY(SELECT bg.genre_id FROM book_genres bg WHERE bg.book_id = b.id) AS genre_ids
    FROM books b
"#;

#[async_trait]
impl EntityStore<Author> for PgStore {
    async fn list(&self) -> Result<Vec<Author>, DatabaseError> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death
             FROM authors
             ORDER BY family_name ASC, first_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, DatabaseError> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death
             FROM authors
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn find_by_key(&self, _key: &str) -> Result<Option<Author>, DatabaseError> {
        Ok(None)
    }

    async fn insert(&self, draft: AuthorDraft) -> Result<Author, DatabaseError> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, first_name, family_name, date_of_birth, date_of_death",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.first_name)
        .bind(&draft.family_name)
        .bind(draft.date_of_birth)
        .bind(draft.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        Ok(author)
    }

    async fn update(&self, id: Uuid, draft: AuthorDraft) -> Result<Option<Author>, DatabaseError> {
        let author = sqlx::query_as::<_, Author>(
            "UPDATE authors
             SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
             WHERE id = $1
             RETURNING id, first_name, family_name, date_of_birth, date_of_death",
        )
        .bind(id)
        .bind(&draft.first_name)
        .bind(&draft.family_name)
        .bind(draft.date_of_birth)
        .bind(draft.date_of_death)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Book>, DatabaseError> {
        let sql = format!("{} WHERE b.author_id = $1 ORDER BY b.title ASC", BOOK_SELECT);
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }
}

#[async_trait]
impl EntityStore<Genre> for PgStore {
    async fn list(&self) -> Result<Vec<Genre>, DatabaseError> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(genres)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>, DatabaseError> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(genre)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Genre>, DatabaseError> {
        let genre = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(genre)
    }

    async fn insert(&self, draft: GenreDraft) -> Result<Genre, DatabaseError> {
        let genre = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(genre)
    }

    async fn update(&self, id: Uuid, draft: GenreDraft) -> Result<Option<Genre>, DatabaseError> {
        let genre = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&draft.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(genre)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn dependents(&self, id: Uuid) -> Result<Vec<Book>, DatabaseError> {
        let sql = format!(
            "{} WHERE EXISTS (SELECT 1 FROM book_genres bg WHERE bg.book_id = b.id AND bg.genre_id = $1)
             ORDER BY b.title ASC",
            BOOK_SELECT
        );
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }
}

#[async_trait]
impl BookStore for PgStore {
    async fn insert_book(&self, book: NewBook) -> Result<Book, DatabaseError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO books (id, title, summary, isbn, author_id) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .execute(&mut *tx)
        .await?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(*genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Book::from_new(id, book))
    }

    async fn find_book(&self, id: Uuid) -> Result<Option<Book>, DatabaseError> {
        let sql = format!("{} WHERE b.id = $1", BOOK_SELECT);
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    async fn delete_book(&self, id: Uuid) -> Result<bool, DatabaseError> {
        // book_genres rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
