//! Book API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload},
    AppState,
};

use super::{EntityId, ValidatedJson};

/// Get book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book with its author", body = Book),
        (status = 400, description = "Book could not be found", body = String)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Book>> {
    state
        .services
        .books
        .get_by_id(id)
        .await
        .map_err(|e| e.with_status(StatusCode::INTERNAL_SERVER_ERROR))?
        .map(Json)
        .ok_or_else(|| AppError::BadRequest("Book could not be found".to_string()))
}

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "Books with their authors", body = Vec<Book>),
        (status = 500, description = "Store failure", body = String)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .books
        .list()
        .await
        .map_err(|e| e.with_status(StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(books))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid fields, unknown author, or store failure")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state
        .services
        .books
        .create(&data)
        .await
        .map_err(|e| e.with_status(StatusCode::BAD_REQUEST))?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book updated", body = Book),
        (status = 400, description = "Invalid fields, unknown book or author, or store failure")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(data): ValidatedJson<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state
        .services
        .books
        .update(id, &data)
        .await
        .map_err(|e| e.with_status(StatusCode::BAD_REQUEST))?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 500, description = "Unknown book or store failure", body = String)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state
        .services
        .books
        .delete(id)
        .await
        .map_err(|e| e.with_status(StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(StatusCode::NO_CONTENT)
}
