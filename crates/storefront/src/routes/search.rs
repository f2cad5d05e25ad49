//! Search route handlers.
//!
//! The search page doubles as the home page. A submitted search is a GET with
//! a `q` parameter; the form fields always render empty afterwards, and the
//! executed query lands in the session's search history. Overview expansion
//! is a POST that flips the session state and redirects back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use movie_store_core::{GenreId, MovieId};

use crate::catalog::{CatalogQuery, types::Genre};
use crate::db::CartRepository;
use crate::error::Result;
use crate::models::session;
use crate::state::AppState;

use super::{MovieView, safe_redirect};

/// Search form parameters, parsed from raw query pairs because `genres`
/// repeats (one value per selected checkbox).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text query; `Some` (possibly empty) when a search was submitted.
    pub q: Option<String>,
    pub genres: Vec<GenreId>,
    pub year: Option<String>,
    pub popular: bool,
    pub actor: Option<String>,
}

impl SearchParams {
    /// Parse the search form from raw query pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" if params.q.is_none() => params.q = Some(value.clone()),
                "genres" => {
                    if let Ok(id) = value.parse::<i64>() {
                        params.genres.push(GenreId::new(id));
                    }
                }
                "year" if params.year.is_none() && !value.trim().is_empty() => {
                    params.year = Some(value.trim().to_string());
                }
                "popular" => params.popular = true,
                "actor" if params.actor.is_none() && !value.trim().is_empty() => {
                    params.actor = Some(value.trim().to_string());
                }
                _ => {}
            }
        }
        params
    }

    /// Whether the request represents a submitted search.
    #[must_use]
    pub const fn submitted(&self) -> bool {
        self.q.is_some()
    }

    /// The raw query text (empty when no `q` was submitted).
    #[must_use]
    pub fn text(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    /// The catalog request for these parameters.
    #[must_use]
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            text: self.text().to_string(),
            genres: self.genres.clone(),
            year: self.year.clone(),
            popular: self.popular,
            actor: self.actor.clone(),
        }
    }

    /// The canonical URL for this search, used as the redirect-back target
    /// for the toggle and cart forms on the results page.
    #[must_use]
    pub fn canonical_url(&self) -> String {
        let Some(q) = self.q.as_deref() else {
            return "/".to_string();
        };
        let mut url = format!("/?q={}", urlencoding::encode(q));
        for genre in &self.genres {
            url.push_str(&format!("&genres={genre}"));
        }
        if let Some(year) = self.year.as_deref() {
            url.push_str(&format!("&year={}", urlencoding::encode(year)));
        }
        if self.popular {
            url.push_str("&popular=on");
        }
        if let Some(actor) = self.actor.as_deref() {
            url.push_str(&format!("&actor={}", urlencoding::encode(actor)));
        }
        url
    }
}

/// A search history row.
#[derive(Clone)]
pub struct HistoryEntry {
    pub query: String,
    /// Link that re-runs this entry as a plain title search.
    pub url: String,
}

/// A cart sidebar row.
#[derive(Clone)]
pub struct CartLine {
    pub id: MovieId,
    pub title: String,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchPageTemplate {
    pub genre_options: Vec<Genre>,
    pub history: Vec<HistoryEntry>,
    pub cart_items: Vec<CartLine>,
    pub results: Vec<MovieView>,
    pub searched: bool,
    pub error: Option<String>,
    pub current_url: String,
}

/// Display the search page, executing a search when one was submitted.
#[instrument(skip(state, session))]
pub async fn page(
    State(state): State<AppState>,
    session: Session,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<SearchPageTemplate> {
    let params = SearchParams::from_pairs(&pairs);

    // Genre options for the form; a catalog failure just means an empty list
    let genre_options = state.catalog().movie_genres().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch genre options: {e}");
        Vec::new()
    });

    let mut error = None;
    let results = if params.submitted() {
        match state.catalog().search(&params.to_query()).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::error!("Failed to search the catalog: {e}");
                error = Some("Movie search failed. Please try again.".to_string());
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    // Record the executed query, fields included or not (the raw text is what
    // the history re-runs)
    if params.submitted()
        && let Err(e) = session::push_search_history(&session, params.text()).await
    {
        tracing::warn!("Failed to record search history: {e}");
    }

    let expanded = session::expanded_overviews(&session).await;
    let results = results
        .iter()
        .map(|movie| MovieView::build(movie, state.catalog(), &expanded))
        .collect();

    let history = session::search_history(&session)
        .await
        .into_iter()
        .map(|query| {
            let url = format!("/?q={}", urlencoding::encode(&query));
            HistoryEntry { query, url }
        })
        .collect();

    let cart_items = match session::cart_id(&session).await {
        Some(cart_id) => CartRepository::new(state.pool())
            .list(cart_id)
            .await?
            .into_iter()
            .map(|movie| CartLine {
                id: movie.id,
                title: movie.title,
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(SearchPageTemplate {
        genre_options,
        history,
        cart_items,
        results,
        searched: params.submitted(),
        error,
        current_url: params.canonical_url(),
    })
}

/// Remove-one history form data.
#[derive(Debug, Deserialize)]
pub struct RemoveHistoryForm {
    pub item: String,
}

/// Remove every history entry equal to the submitted item.
#[instrument(skip(session))]
pub async fn remove_history(
    session: Session,
    Form(form): Form<RemoveHistoryForm>,
) -> Result<Redirect> {
    session::remove_search_history(&session, &form.item).await?;
    Ok(Redirect::to("/"))
}

/// Clear the search history.
#[instrument(skip(session))]
pub async fn clear_history(session: Session) -> Result<Redirect> {
    session::clear_search_history(&session).await?;
    Ok(Redirect::to("/"))
}

/// Overview toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleOverviewForm {
    pub movie_id: i64,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Toggle a movie overview between truncated and full, then return to the
/// page the toggle was on.
#[instrument(skip(session))]
pub async fn toggle_overview(
    session: Session,
    Form(form): Form<ToggleOverviewForm>,
) -> Result<Redirect> {
    session::toggle_overview(&session, MovieId::new(form.movie_id)).await?;
    Ok(Redirect::to(safe_redirect(form.redirect.as_deref(), "/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_idle_when_no_query_key() {
        let params = SearchParams::from_pairs(&pairs(&[]));
        assert!(!params.submitted());
        assert_eq!(params.canonical_url(), "/");
    }

    #[test]
    fn test_from_pairs_empty_query_still_counts_as_submitted() {
        let params = SearchParams::from_pairs(&pairs(&[("q", "")]));
        assert!(params.submitted());
        assert_eq!(params.text(), "");
    }

    #[test]
    fn test_from_pairs_collects_repeated_genres() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("q", "toy"),
            ("genres", "16"),
            ("genres", "10751"),
            ("genres", "not-a-number"),
        ]));
        assert_eq!(params.genres, vec![GenreId::new(16), GenreId::new(10751)]);
    }

    #[test]
    fn test_from_pairs_trims_and_drops_empty_fields() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("q", "matrix"),
            ("year", "  "),
            ("actor", " Keanu Reeves "),
        ]));
        assert_eq!(params.year, None);
        assert_eq!(params.actor.as_deref(), Some("Keanu Reeves"));
    }

    #[test]
    fn test_canonical_url_round_trips_fields() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("q", "toy story"),
            ("genres", "16"),
            ("year", "1995"),
            ("popular", "on"),
        ]));
        assert_eq!(
            params.canonical_url(),
            "/?q=toy%20story&genres=16&year=1995&popular=on"
        );
    }
}
