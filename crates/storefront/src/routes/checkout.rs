//! Checkout route handlers.
//!
//! The payment total is always derived from the cart count on the server; the
//! form's payment field is display-only. A successful submission logs the
//! purchase and clears the cart concurrently, then redirects home whether or
//! not the logging endpoint accepted the record.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::CartRepository;
use crate::error::Result;
use crate::models::session;
use crate::services::PurchaseRecord;
use crate::state::AppState;

use super::cart::cart_total;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub has_items: bool,
    pub total: Decimal,
    pub error: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl CheckoutTemplate {
    fn empty_cart() -> Self {
        Self {
            has_items: false,
            total: cart_total(0),
            error: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }
    }

    fn form(total: Decimal) -> Self {
        Self {
            has_items: true,
            total,
            error: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }
    }
}

/// Current cart entry count, zero when no cart exists yet.
async fn cart_count(state: &AppState, session: &Session) -> Result<i64> {
    match session::cart_id(session).await {
        Some(cart_id) => Ok(CartRepository::new(state.pool()).count(cart_id).await?),
        None => Ok(0),
    }
}

/// Display the checkout page.
///
/// With an empty cart only the empty-cart notice is rendered, never the form.
#[instrument(skip(state, session))]
pub async fn page(State(state): State<AppState>, session: Session) -> Result<CheckoutTemplate> {
    let count = cart_count(&state, &session).await?;
    if count == 0 {
        return Ok(CheckoutTemplate::empty_cart());
    }
    Ok(CheckoutTemplate::form(cart_total(count)))
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Complete the purchase.
///
/// Validates that all three fields are non-empty (no format validation).
/// On success the purchase record is submitted and the cart cleared
/// concurrently; the user lands on the home page either way.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let count = cart_count(&state, &session).await?;
    if count == 0 {
        return Ok(CheckoutTemplate::empty_cart().into_response());
    }
    let total = cart_total(count);

    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = form.email.trim();

    if first_name.is_empty() || last_name.is_empty() || email.is_empty() {
        return Ok(CheckoutTemplate {
            has_items: true,
            total,
            error: Some("All fields are required.".to_string()),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
        .into_response());
    }

    let record = PurchaseRecord {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        payment: total,
    };

    // Submit the purchase and empty the cart in parallel; the redirect does
    // not wait on the logging endpoint's verdict
    if let Some(cart_id) = session::cart_id(&session).await {
        let repo = CartRepository::new(state.pool());
        let (logged, cleared) = tokio::join!(state.purchases().submit(&record), repo.clear(cart_id));

        if let Err(e) = logged {
            tracing::warn!("Failed to log purchase: {e}");
        }
        if let Err(e) = cleared {
            tracing::warn!("Failed to empty cart after checkout: {e}");
        }
    }

    Ok(Redirect::to("/").into_response())
}
