//! Business logic services

pub mod authors;
pub mod books;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            repository,
        }
    }

    /// Whether the backing store can serve requests
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
