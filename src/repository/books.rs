//! Books repository for database operations
//!
//! Every statement returns the book joined with its author so callers always
//! get the embedded `{id, firstName, lastName}`.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{book_not_found, map_fk_violation, unknown_author, BookStore};
use crate::{
    error::AppResult,
    models::{Book, BookRow, NewBook},
};

const BOOK_COLUMNS: &str = r#"
    b.id, b.title, b."datePublished", b."isFiction",
    a.id AS "authorId", a."firstName" AS "authorFirstName", a."lastName" AS "authorLastName"
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!(
            r#"SELECT {} FROM "Book" b JOIN "Author" a ON a.id = b."authorId""#,
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!(
            r#"SELECT {} FROM "Book" b JOIN "Author" a ON a.id = b."authorId" WHERE b.id = $1"#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            WITH b AS (
                INSERT INTO "Book" (title, "datePublished", "isFiction", "authorId")
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {} FROM b JOIN "Author" a ON a.id = b."authorId"
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&data.title)
            .bind(data.date_published)
            .bind(data.is_fiction)
            .bind(data.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || unknown_author(data.author_id)))?;
        Ok(row.into())
    }

    async fn update(&self, id: i32, data: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            WITH b AS (
                UPDATE "Book"
                SET title = $1, "datePublished" = $2, "isFiction" = $3, "authorId" = $4
                WHERE id = $5
                RETURNING *
            )
            SELECT {} FROM b JOIN "Author" a ON a.id = b."authorId"
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&data.title)
            .bind(data.date_published)
            .bind(data.is_fiction)
            .bind(data.author_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || unknown_author(data.author_id)))?;
        row.map(Book::from).ok_or_else(|| book_not_found(id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(r#"DELETE FROM "Book" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(book_not_found(id));
        }
        Ok(())
    }
}
