//! Repository layer for database operations
//!
//! Each entity gets an object-safe store trait so the services do not depend
//! on a particular backend. [`Repository::new`] wires the PostgreSQL stores,
//! [`Repository::in_memory`] a process-local store with the same semantics.

pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, NewAuthor, NewBook},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Author>>;

    /// `Ok(None)` when no author has this id
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>>;

    async fn create(&self, data: &NewAuthor) -> AppResult<Author>;

    async fn update(&self, id: i32, data: &NewAuthor) -> AppResult<Author>;

    /// Fails with a constraint error while books still reference the author
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// `Ok(None)` when no book has this id
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, data: &NewBook) -> AppResult<Book>;

    async fn update(&self, id: i32, data: &NewBook) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding one store per entity
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
    /// Present only for the PostgreSQL stores
    pub pool: Option<Pool<Postgres>>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Repository backed by process memory, with foreign keys enforced
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            authors: store.clone(),
            books: store,
            pool: None,
        }
    }

    pub fn from_stores(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self {
            authors,
            books,
            pool: None,
        }
    }

    /// Round-trip to the database; stores without a pool are always reachable
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}

pub(crate) fn author_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}

pub(crate) fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

pub(crate) fn unknown_author(author_id: i32) -> AppError {
    AppError::Constraint(format!("Author {} does not exist", author_id))
}

pub(crate) fn author_has_books(id: i32) -> AppError {
    AppError::Constraint(format!("Author {} is still referenced by books", id))
}

/// Turn a foreign-key violation into `on_fk`, pass every other error through
pub(crate) fn map_fk_violation(err: sqlx::Error, on_fk: impl FnOnce() -> AppError) -> AppError {
    let is_fk = err
        .as_database_error()
        .map_or(false, |db| db.is_foreign_key_violation());
    if is_fk {
        on_fk()
    } else {
        AppError::Database(err)
    }
}
