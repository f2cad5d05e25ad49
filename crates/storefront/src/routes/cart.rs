//! Cart route handlers.
//!
//! Cart mutations are plain form POSTs that redirect back to the page they
//! came from; the redirected GET re-reads the store, so the rendered cart
//! always reflects what the database confirmed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use movie_store_core::{CurrencyCode, Movie, MovieId, Price};

use crate::db::CartRepository;
use crate::error::Result;
use crate::filters;
use crate::models::session;
use crate::state::AppState;

use super::{MovieView, safe_redirect};

/// Fixed per-movie price in cents.
const UNIT_PRICE_CENTS: i64 = 399;

/// The fixed per-movie price ($3.99).
#[must_use]
pub fn unit_price() -> Price {
    Price::from_cents(UNIT_PRICE_CENTS, CurrencyCode::USD)
}

/// Total cost for a cart of `count` entries.
#[must_use]
pub fn cart_total(count: i64) -> Decimal {
    unit_price().amount * Decimal::from(count)
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub items: Vec<MovieView>,
    pub total: Decimal,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let items = match session::cart_id(&session).await {
        Some(cart_id) => CartRepository::new(state.pool()).list(cart_id).await?,
        None => Vec::new(),
    };

    let expanded = session::expanded_overviews(&session).await;
    let items: Vec<MovieView> = items
        .iter()
        .map(|movie| MovieView::build(movie, state.catalog(), &expanded))
        .collect();

    let total = cart_total(i64::try_from(items.len()).unwrap_or(0));

    Ok(CartShowTemplate { items, total })
}

/// Add to cart form data (the movie travels as hidden fields).
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

impl From<&AddToCartForm> for Movie {
    fn from(form: &AddToCartForm) -> Self {
        Self {
            id: MovieId::new(form.id),
            title: form.title.clone(),
            poster_path: form.poster_path.clone(),
            overview: form.overview.clone(),
            release_date: form.release_date.clone(),
        }
    }
}

/// Add a movie to the cart, then return to the page the form was on.
///
/// Adding a movie that is already in the cart is a no-op.
#[instrument(skip(state, session, form), fields(movie_id = form.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let cart_id = session::ensure_cart_id(&session).await?;
    let movie = Movie::from(&form);

    let inserted = CartRepository::new(state.pool())
        .add(cart_id, &movie)
        .await?;
    if !inserted {
        tracing::debug!(movie_id = form.id, "Movie already in cart");
    }

    Ok(Redirect::to(safe_redirect(form.redirect.as_deref(), "/")))
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub movie_id: i64,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Remove a movie from the cart, then return to the page the form was on.
#[instrument(skip(state, session, form), fields(movie_id = form.movie_id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    if let Some(cart_id) = session::cart_id(&session).await {
        CartRepository::new(state.pool())
            .remove(cart_id, MovieId::new(form.movie_id))
            .await?;
    }

    Ok(Redirect::to(safe_redirect(
        form.redirect.as_deref(),
        "/cart",
    )))
}

/// Empty cart form data.
#[derive(Debug, Default, Deserialize)]
pub struct ClearCartForm {
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Empty the cart in one call, with no confirmation step.
#[instrument(skip(state, session, form))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ClearCartForm>,
) -> Result<Redirect> {
    if let Some(cart_id) = session::cart_id(&session).await {
        CartRepository::new(state.pool()).clear(cart_id).await?;
    }

    Ok(Redirect::to(safe_redirect(
        form.redirect.as_deref(),
        "/cart",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_display() {
        assert_eq!(unit_price().display(), "$3.99");
    }

    #[test]
    fn test_cart_total_is_exact() {
        assert_eq!(cart_total(0).to_string(), "0.00");
        assert_eq!(cart_total(1).to_string(), "3.99");
        assert_eq!(cart_total(3).to_string(), "11.97");
    }

    #[test]
    fn test_add_form_to_movie() {
        let form = AddToCartForm {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            overview: "Set in the 22nd century.".to_string(),
            release_date: "1999-03-30".to_string(),
            redirect: None,
        };

        let movie = Movie::from(&form);
        assert_eq!(movie.id, MovieId::new(603));
        assert_eq!(movie.poster_path.as_deref(), Some("/poster.jpg"));
    }
}
