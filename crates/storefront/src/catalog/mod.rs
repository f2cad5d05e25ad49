//! Movie catalog API client.
//!
//! Thin REST client for the remote movie search service. The storefront only
//! ever reads from the catalog: genre options, title search, person search,
//! and discover-by-cast. Every response is converted into the shared
//! [`Movie`] record at this boundary so the rest of the application never
//! sees wire types.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_store_storefront::catalog::{CatalogClient, CatalogQuery};
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! let results = client
//!     .search(&CatalogQuery {
//!         text: "matrix".to_string(),
//!         ..CatalogQuery::default()
//!     })
//!     .await?;
//! ```

pub mod types;

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use movie_store_core::{GenreId, Movie, PersonId};

use crate::config::CatalogConfig;
use types::{Genre, GenreListResponse, MovieListResponse, PersonListResponse};

/// Genre names offered in the search form's genre dropdown.
const FEATURED_GENRES: &[&str] = &["Animation", "Music", "Family"];

/// Errors that can occur when querying the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed or the response body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Client for the movie catalog API.
///
/// Cheaply cloneable; all requests carry the API key as a query parameter.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api_base: String,
    image_base: String,
    api_key: String,
}

/// A movie search request.
///
/// When `actor` is present and resolves to a person, the person's filmography
/// is returned and every other field is ignored.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Free-text title query.
    pub text: String,
    /// Genre ids to filter by.
    pub genres: Vec<GenreId>,
    /// Release year, passed through as entered.
    pub year: Option<String>,
    /// Sort results by popularity.
    pub popular: bool,
    /// Actor name; resolved via person search.
    pub actor: Option<String>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                api_base: config.api_base.clone(),
                image_base: config.image_base.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Full URL for a poster image path returned by the catalog.
    #[must_use]
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{poster_path}", self.inner.image_base)
    }

    /// Execute a GET request against the catalog and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{path}", self.inner.api_base);

        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("api_key", self.inner.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Search the catalog.
    ///
    /// If an actor name is supplied and resolves to a person, their
    /// filmography is returned and the title/genre/year/popularity query is
    /// skipped entirely. An actor name that matches nobody falls back to the
    /// ordinary movie search.
    ///
    /// # Errors
    ///
    /// Returns an error if any underlying request fails.
    #[instrument(skip(self), fields(text = %query.text))]
    pub async fn search(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        if let Some(actor) = query.actor.as_deref()
            && let Some(person_id) = self.search_person(actor).await?
        {
            return self.discover_by_cast(person_id).await;
        }

        self.search_movies(query).await
    }

    /// Title search with optional genre/year/popularity refinements.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(text = %query.text))]
    pub async fn search_movies(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        let params = search_params(query);
        let response: MovieListResponse = self.get_json("/search/movie", &params).await?;
        Ok(response.results.into_iter().map(Movie::from).collect())
    }

    /// Resolve an actor name to a person id (first match wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn search_person(&self, name: &str) -> Result<Option<PersonId>, CatalogError> {
        let params = [("query", name.to_string())];
        let response: PersonListResponse = self.get_json("/search/person", &params).await?;
        Ok(response.results.into_iter().next().map(|person| person.id))
    }

    /// Movies featuring the given person.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(person_id = %person_id))]
    pub async fn discover_by_cast(&self, person_id: PersonId) -> Result<Vec<Movie>, CatalogError> {
        let params = [("with_cast", person_id.to_string())];
        let response: MovieListResponse = self.get_json("/discover/movie", &params).await?;
        Ok(response.results.into_iter().map(Movie::from).collect())
    }

    /// Genre options for the search form, filtered to the featured names.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn movie_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let response: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;
        Ok(response
            .genres
            .into_iter()
            .filter(|genre| FEATURED_GENRES.contains(&genre.name.as_str()))
            .collect())
    }
}

/// Build the query parameters for a title search.
fn search_params(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", query.text.clone()),
        ("include_adult", "false".to_string()),
    ];
    if !query.genres.is_empty() {
        params.push(("with_genres", genre_csv(&query.genres)));
    }
    if let Some(year) = query.year.as_deref() {
        params.push(("primary_release_year", year.to_string()));
    }
    if query.popular {
        params.push(("sort_by", "popularity.desc".to_string()));
    }
    params
}

/// Comma-separated genre id list for the `with_genres` parameter.
fn genre_csv(genres: &[GenreId]) -> String {
    genres
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_search_params_minimal() {
        let query = CatalogQuery {
            text: "matrix".to_string(),
            ..CatalogQuery::default()
        };
        let params = search_params(&query);

        assert_eq!(param(&params, "query"), Some("matrix"));
        assert_eq!(param(&params, "include_adult"), Some("false"));
        assert_eq!(param(&params, "with_genres"), None);
        assert_eq!(param(&params, "primary_release_year"), None);
        assert_eq!(param(&params, "sort_by"), None);
    }

    #[test]
    fn test_search_params_full() {
        let query = CatalogQuery {
            text: "toy".to_string(),
            genres: vec![GenreId::new(16), GenreId::new(10402)],
            year: Some("1995".to_string()),
            popular: true,
            actor: None,
        };
        let params = search_params(&query);

        assert_eq!(param(&params, "with_genres"), Some("16,10402"));
        assert_eq!(param(&params, "primary_release_year"), Some("1995"));
        assert_eq!(param(&params, "sort_by"), Some("popularity.desc"));
    }

    #[test]
    fn test_genre_csv() {
        assert_eq!(genre_csv(&[]), "");
        assert_eq!(genre_csv(&[GenreId::new(16)]), "16");
        assert_eq!(
            genre_csv(&[GenreId::new(16), GenreId::new(10751)]),
            "16,10751"
        );
    }

    #[test]
    fn test_featured_genres() {
        assert!(FEATURED_GENRES.contains(&"Animation"));
        assert!(FEATURED_GENRES.contains(&"Music"));
        assert!(FEATURED_GENRES.contains(&"Family"));
        assert!(!FEATURED_GENRES.contains(&"Horror"));
    }
}
