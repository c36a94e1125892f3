//! Author model and related types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{as_string, is_string, ValidatedPayload};

/// Author record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Validated author fields for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Raw author request body; absent fields deserialize as `null`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AuthorPayload {
    #[serde(rename = "firstName", default)]
    #[validate(custom(function = "is_string"))]
    #[schema(value_type = String)]
    pub first_name: Value,
    #[serde(rename = "lastName", default)]
    #[validate(custom(function = "is_string"))]
    #[schema(value_type = String)]
    pub last_name: Value,
}

impl ValidatedPayload for AuthorPayload {
    type Output = NewAuthor;

    fn into_output(self) -> Option<NewAuthor> {
        Some(NewAuthor {
            first_name: as_string(&self.first_name)?,
            last_name: as_string(&self.last_name)?,
        })
    }
}
