//! Authors repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{author_has_books, author_not_found, map_fk_violation, AuthorStore};
use crate::{
    error::AppResult,
    models::{Author, NewAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(r#"SELECT id, "firstName", "lastName" FROM "Author""#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"SELECT id, "firstName", "lastName" FROM "Author" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO "Author" ("firstName", "lastName")
            VALUES ($1, $2)
            RETURNING id, "firstName", "lastName"
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &NewAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE "Author" SET "firstName" = $1, "lastName" = $2
            WHERE id = $3
            RETURNING id, "firstName", "lastName"
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| author_not_found(id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(r#"DELETE FROM "Author" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || author_has_books(id)))?;
        if result.rows_affected() == 0 {
            return Err(author_not_found(id));
        }
        Ok(())
    }
}
