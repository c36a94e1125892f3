//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the JSON field, as sent by the client
    pub field: String,
    pub message: String,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// An error whose HTTP status was chosen by the route that caught it
    #[error("{message}")]
    Route { status: StatusCode, message: String },
}

impl AppError {
    /// Report this error with the given status instead of the default mapping.
    ///
    /// Store details never reach the client: database and internal errors
    /// are logged here and replaced with a generic message.
    pub fn with_status(self, status: StatusCode) -> Self {
        let message = self.client_message();
        AppError::Route { status, message }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Invalid request body".to_string(),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Constraint(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Route { message, .. } => message.clone(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Constraint(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Route { status, .. } => *status,
        }
    }
}

/// `first_name` -> `firstName`; names already in camelCase pass through
fn json_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = json_field_name(&field.to_string());
                errs.iter().map(move |e| FieldError {
                    message: match &e.message {
                        Some(message) => format!("{} {}", field, message),
                        None => format!("{} is invalid ({})", field, e.code),
                    },
                    field: field.clone(),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Validation(errors) => {
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            other => (status, Json(other.client_message())).into_response(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
