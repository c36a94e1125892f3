//! Author service

use crate::{
    error::AppResult,
    models::{Author, NewAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get author by ID, `None` if it does not exist
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        let author = self.repository.authors.create(data).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(author)
    }

    pub async fn update(&self, id: i32, data: &NewAuthor) -> AppResult<Author> {
        let author = self.repository.authors.update(id, data).await?;
        tracing::info!("Updated author id={}", id);
        Ok(author)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}
