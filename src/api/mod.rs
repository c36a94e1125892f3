//! API handlers for Bookshelf REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, validation::ValidatedPayload, AppState};

/// Integer `:id` path segment; anything else is rejected with 400
pub struct EntityId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.trim()
            .parse::<i32>()
            .map(EntityId)
            .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)))
    }
}

/// JSON body checked field by field before the handler runs.
///
/// Yields the payload's validated output; failures become a 400 listing
/// every rejected field.
pub struct ValidatedJson<T: ValidatedPayload>(pub T::Output);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: ValidatedPayload + DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        payload.validate()?;
        payload
            .into_output()
            .map(ValidatedJson)
            .ok_or_else(|| AppError::Internal("Validated payload failed to convert".to_string()))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let author_routes = Router::new()
        .route("/", get(authors::list_authors).post(authors::create_author))
        .route(
            "/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        );

    let book_routes = Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route(
            "/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        );

    let api = Router::new()
        .nest("/api/authors", author_routes)
        .nest("/api/books", book_routes)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
