//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Search page (also the home page)
//! GET  /health                 - Health check (wired in main)
//!
//! # Search
//! GET  /?q=...                 - Execute a search (optional genres/year/popular/actor)
//! POST /overview/toggle        - Toggle a movie overview between truncated and full
//! POST /search/history/remove  - Remove one history entry
//! POST /search/history/clear   - Clear the search history
//!
//! # Cart (HTML)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a movie, redirect back
//! POST /cart/remove            - Remove a movie, redirect back
//! POST /cart/clear             - Empty the cart, redirect back
//!
//! # Checkout
//! GET  /checkout               - Checkout form (or empty-cart notice)
//! POST /checkout               - Complete purchase, clear cart, redirect home
//!
//! # Cart API (JSON, the original backend contract)
//! GET    /api/cart             - List cart contents
//! POST   /api/cart             - Add a movie ({"movie": {...}} body)
//! DELETE /api/cart/{id}        - Remove one movie
//! DELETE /api/cart             - Remove all movies
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use movie_store_core::{Movie, MovieId};

use crate::catalog::CatalogClient;
use crate::filters::{OVERVIEW_WORD_LIMIT, truncate_words};
use crate::state::AppState;

/// Movie display data for templates.
///
/// Shared by the search results and the cart page; both render the same row
/// with the same overview toggling.
#[derive(Clone)]
pub struct MovieView {
    pub id: MovieId,
    pub title: String,
    /// Raw poster path, re-submitted by the add-to-cart form.
    pub poster_path: Option<String>,
    /// Fully-qualified poster image URL.
    pub poster_url: Option<String>,
    /// Full overview text.
    pub overview: String,
    /// First 20 words plus ellipsis; `None` when the overview fits.
    pub truncated: Option<String>,
    /// Whether this movie's overview is currently expanded.
    pub expanded: bool,
    pub release_date: String,
    /// Per-unit price for display.
    pub price: String,
}

impl MovieView {
    /// Build the display row for a movie.
    #[must_use]
    pub fn build(movie: &Movie, catalog: &CatalogClient, expanded_ids: &[MovieId]) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| catalog.poster_url(path)),
            overview: movie.overview.clone(),
            truncated: truncate_words(&movie.overview, OVERVIEW_WORD_LIMIT),
            expanded: expanded_ids.contains(&movie.id),
            release_date: movie.release_date.clone(),
            price: cart::unit_price().display(),
        }
    }
}

/// Only allow redirect targets that stay on this site.
///
/// Anything that is not a local absolute path falls back to the default.
#[must_use]
pub fn safe_redirect<'a>(target: Option<&'a str>, default: &'a str) -> &'a str {
    match target {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => default,
    }
}

/// Create the search history routes router.
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/remove", post(search::remove_history))
        .route("/clear", post(search::clear_history))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the cart API router (the original backend contract).
pub fn cart_api_routes() -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route(
            "/",
            get(api::cart::list).post(api::cart::add).delete(api::cart::clear),
        )
        .route("/{id}", delete(api::cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Search page (home)
        .route("/", get(search::page))
        .route("/overview/toggle", post(search::toggle_overview))
        .nest("/search/history", history_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::page).post(checkout::submit))
        // Cart API
        .nest("/api/cart", cart_api_routes())
}
