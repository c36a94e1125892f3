//! Book service

use crate::{
    error::AppResult,
    models::{Book, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books with their authors
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get book by ID, `None` if it does not exist
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let book = self.repository.books.create(data).await?;
        tracing::info!("Created book id={} for author id={}", book.id, data.author_id);
        Ok(book)
    }

    pub async fn update(&self, id: i32, data: &NewBook) -> AppResult<Book> {
        let book = self.repository.books.update(id, data).await?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }
}
