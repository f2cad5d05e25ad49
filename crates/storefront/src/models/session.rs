//! Session-held view state.
//!
//! The session carries the per-browser pieces of view state: the cart id the
//! database rows are keyed by, the search history, and which overviews are
//! expanded. Everything here is lost when the session expires; only the cart
//! rows themselves live in the database.

use tower_sessions::Session;
use uuid::Uuid;

use movie_store_core::MovieId;

/// Session keys for storefront view state.
pub mod session_keys {
    /// Key for the cart id the `cart_items` rows are keyed by.
    pub const CART_ID: &str = "cart_id";

    /// Key for the list of past search queries.
    pub const SEARCH_HISTORY: &str = "search_history";

    /// Key for the movie ids whose overview is shown in full.
    pub const EXPANDED_OVERVIEWS: &str = "expanded_overviews";
}

/// Get the cart id from the session, if one exists.
pub async fn cart_id(session: &Session) -> Option<Uuid> {
    session
        .get::<Uuid>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Get the cart id from the session, creating one on first use.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn ensure_cart_id(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(id) = session.get::<Uuid>(session_keys::CART_ID).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(session_keys::CART_ID, id).await?;
    Ok(id)
}

/// Get the search history, newest last.
pub async fn search_history(session: &Session) -> Vec<String> {
    session
        .get::<Vec<String>>(session_keys::SEARCH_HISTORY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Append a query string to the search history.
///
/// The raw query is recorded on every executed search, duplicates included.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn push_search_history(
    session: &Session,
    query: &str,
) -> Result<(), tower_sessions::session::Error> {
    let mut history = search_history(session).await;
    history.push(query.to_string());
    session.insert(session_keys::SEARCH_HISTORY, history).await
}

/// Remove every history entry equal to `item`.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn remove_search_history(
    session: &Session,
    item: &str,
) -> Result<(), tower_sessions::session::Error> {
    let mut history = search_history(session).await;
    history.retain(|entry| entry != item);
    session.insert(session_keys::SEARCH_HISTORY, history).await
}

/// Clear the search history.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn clear_search_history(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::SEARCH_HISTORY, Vec::<String>::new())
        .await
}

/// Movie ids whose overview is currently expanded.
pub async fn expanded_overviews(session: &Session) -> Vec<MovieId> {
    session
        .get::<Vec<MovieId>>(session_keys::EXPANDED_OVERVIEWS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Toggle a movie's overview between truncated and expanded.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn toggle_overview(
    session: &Session,
    movie_id: MovieId,
) -> Result<(), tower_sessions::session::Error> {
    let mut expanded = expanded_overviews(session).await;
    if expanded.contains(&movie_id) {
        expanded.retain(|id| *id != movie_id);
    } else {
        expanded.push(movie_id);
    }
    session
        .insert(session_keys::EXPANDED_OVERVIEWS, expanded)
        .await
}
