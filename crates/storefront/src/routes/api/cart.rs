//! Cart API route handlers.
//!
//! The JSON contract the original cart backend exposed, kept as-is so any
//! client of the old endpoints keeps working:
//!
//! - `GET /api/cart` returns the cart contents as a movie list
//! - `POST /api/cart` takes `{"movie": {...}}` and echoes the movie back
//! - `DELETE /api/cart/{id}` removes one entry
//! - `DELETE /api/cart` removes all entries
//!
//! The API shares the session cart with the HTML views.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use movie_store_core::{Movie, MovieId};

use crate::db::CartRepository;
use crate::error::Result;
use crate::models::session;
use crate::state::AppState;

/// Request body for adding a movie (the movie rides in a wrapper object).
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub movie: Movie,
}

/// List the cart contents.
#[instrument(skip(state, session))]
pub async fn list(State(state): State<AppState>, session: Session) -> Result<Json<Vec<Movie>>> {
    let movies = match session::cart_id(&session).await {
        Some(cart_id) => CartRepository::new(state.pool()).list(cart_id).await?,
        None => Vec::new(),
    };

    Ok(Json(movies))
}

/// Add a movie to the cart.
///
/// Adding a movie that is already present is a no-op; the movie is echoed
/// back either way.
#[instrument(skip(state, session, request), fields(movie_id = %request.movie.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<Movie>> {
    let cart_id = session::ensure_cart_id(&session).await?;

    CartRepository::new(state.pool())
        .add(cart_id, &request.movie)
        .await?;

    Ok(Json(request.movie))
}

/// Remove one movie from the cart by id.
///
/// Removing an id that is not present leaves the cart unchanged.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    if let Some(cart_id) = session::cart_id(&session).await {
        CartRepository::new(state.pool())
            .remove(cart_id, MovieId::new(id))
            .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Remove every movie from the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<StatusCode> {
    if let Some(cart_id) = session::cart_id(&session).await {
        CartRepository::new(state.pool()).clear(cart_id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_unwraps_movie_body() {
        let request: AddToCartRequest = serde_json::from_str(
            r#"{
                "movie": {
                    "id": 603,
                    "title": "The Matrix",
                    "poster_path": "/poster.jpg",
                    "overview": "Set in the 22nd century.",
                    "release_date": "1999-03-30"
                }
            }"#,
        )
        .expect("deserialize");

        assert_eq!(request.movie.id, MovieId::new(603));
        assert_eq!(request.movie.title, "The Matrix");
    }
}
