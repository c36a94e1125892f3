//! Author API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorPayload},
    AppState,
};

use super::{EntityId, ValidatedJson};

/// Body of `DELETE /api/authors/{id}`, sent with status 404
pub const AUTHOR_DELETED: &str = "Author has been deleted sucessfully";

/// Store failures on author routes are reported as 500
fn failed(err: AppError) -> AppError {
    err.with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

/// List all authors
#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = Vec<Author>),
        (status = 500, description = "Store failure", body = String)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await.map_err(failed)?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 400, description = "Author could not be found", body = String)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Author>> {
    state
        .services
        .authors
        .get_by_id(id)
        .await
        .map_err(failed)?
        .map(Json)
        .ok_or_else(|| AppError::BadRequest("Author could not be found".to_string()))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "authors",
    request_body = AuthorPayload,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid fields"),
        (status = 500, description = "Store failure", body = String)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<AuthorPayload>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(&data).await.map_err(failed)?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Update an author
#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorPayload,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid fields"),
        (status = 500, description = "Unknown author or store failure", body = String)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(data): ValidatedJson<AuthorPayload>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(id, &data).await.map_err(failed)?;
    Ok(Json(author))
}

/// Delete an author.
///
/// Success answers 404 with a confirmation message; clients depend on it.
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 404, description = "Author deleted", body = String),
        (status = 500, description = "Unknown author, author still has books, or store failure", body = String)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<(StatusCode, Json<&'static str>)> {
    state.services.authors.delete(id).await.map_err(failed)?;
    Ok((StatusCode::NOT_FOUND, Json(AUTHOR_DELETED)))
}
