//! Data models for Bookshelf

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorPayload, NewAuthor};
pub use book::{Book, BookPayload, BookRow, NewBook};
