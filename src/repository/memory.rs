//! In-memory store implementing both entity stores.
//!
//! Mirrors the PostgreSQL schema: ids come from per-table sequences, book
//! writes require an existing author, and an author cannot be deleted while
//! a book references it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{
    author_has_books, author_not_found, book_not_found, unknown_author, AuthorStore, BookStore,
};
use crate::{
    error::AppResult,
    models::{Author, Book, NewAuthor, NewBook},
};

#[derive(Debug, Clone)]
struct StoredBook {
    title: String,
    date_published: DateTime<Utc>,
    is_fiction: bool,
    author_id: i32,
}

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<i32, NewAuthor>,
    books: BTreeMap<i32, StoredBook>,
    author_seq: i32,
    book_seq: i32,
}

impl Tables {
    fn author(&self, id: i32) -> Option<Author> {
        self.authors.get(&id).map(|a| Author {
            id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
        })
    }

    fn book(&self, id: i32) -> Option<Book> {
        let stored = self.books.get(&id)?;
        let author = self.author(stored.author_id)?;
        Some(Book {
            id,
            title: stored.title.clone(),
            date_published: stored.date_published,
            is_fiction: stored.is_fiction,
            author,
        })
    }
}

impl From<&NewBook> for StoredBook {
    fn from(data: &NewBook) -> Self {
        Self {
            title: data.title.clone(),
            date_published: data.date_published,
            is_fiction: data.is_fiction,
            author_id: data.author_id,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(tables.authors.keys().filter_map(|id| tables.author(*id)).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.tables.read().await.author(id))
    }

    async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        tables.author_seq += 1;
        let id = tables.author_seq;
        tables.authors.insert(id, data.clone());
        Ok(Author {
            id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
        })
    }

    async fn update(&self, id: i32, data: &NewAuthor) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let stored = tables.authors.get_mut(&id).ok_or_else(|| author_not_found(id))?;
        *stored = data.clone();
        Ok(Author {
            id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
        })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&id) {
            return Err(author_not_found(id));
        }
        if tables.books.values().any(|b| b.author_id == id) {
            return Err(author_has_books(id));
        }
        tables.authors.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.books.keys().filter_map(|id| tables.book(*id)).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.book(id))
    }

    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&data.author_id) {
            return Err(unknown_author(data.author_id));
        }
        tables.book_seq += 1;
        let id = tables.book_seq;
        tables.books.insert(id, StoredBook::from(data));
        tables.book(id).ok_or_else(|| book_not_found(id))
    }

    async fn update(&self, id: i32, data: &NewBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Err(book_not_found(id));
        }
        if !tables.authors.contains_key(&data.author_id) {
            return Err(unknown_author(data.author_id));
        }
        tables.books.insert(id, StoredBook::from(data));
        tables.book(id).ok_or_else(|| book_not_found(id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.books.remove(&id).map(|_| ()).ok_or_else(|| book_not_found(id))
    }
}
