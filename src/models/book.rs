//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;
use crate::validation::{
    as_bool, as_date, as_int, as_string, is_boolean, is_date, is_int, is_string, ValidatedPayload,
};

/// Book with its author embedded, as returned by every read path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub date_published: DateTime<Utc>,
    pub is_fiction: bool,
    pub author: Author,
}

/// Flat row produced by the book/author join
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct BookRow {
    pub id: i32,
    pub title: String,
    pub date_published: DateTime<Utc>,
    pub is_fiction: bool,
    pub author_id: i32,
    pub author_first_name: String,
    pub author_last_name: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            date_published: row.date_published,
            is_fiction: row.is_fiction,
            author: Author {
                id: row.author_id,
                first_name: row.author_first_name,
                last_name: row.author_last_name,
            },
        }
    }
}

/// Validated book fields for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: i32,
    pub date_published: DateTime<Utc>,
    pub is_fiction: bool,
}

/// Raw book request body; absent fields deserialize as `null`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[serde(default)]
    #[validate(custom(function = "is_string"))]
    #[schema(value_type = String)]
    pub title: Value,
    #[serde(rename = "authorId", default)]
    #[validate(custom(function = "is_int"))]
    #[schema(value_type = i32)]
    pub author_id: Value,
    /// `YYYY-MM-DD`, `YYYY/MM/DD` or an RFC 3339 date-time
    #[serde(rename = "datePublished", default)]
    #[validate(custom(function = "is_date"))]
    #[schema(value_type = String)]
    pub date_published: Value,
    #[serde(rename = "isFiction", default)]
    #[validate(custom(function = "is_boolean"))]
    #[schema(value_type = bool)]
    pub is_fiction: Value,
}

impl ValidatedPayload for BookPayload {
    type Output = NewBook;

    fn into_output(self) -> Option<NewBook> {
        Some(NewBook {
            title: as_string(&self.title)?,
            author_id: as_int(&self.author_id)?,
            date_published: as_date(&self.date_published)?,
            is_fiction: as_bool(&self.is_fiction)?,
        })
    }
}
