//! Wire types for catalog API responses.
//!
//! Responses carry many more fields than the storefront needs; serde ignores
//! the rest. Nullable text fields are normalized to empty strings when
//! converting to the shared [`Movie`] record.

use serde::Deserialize;

use movie_store_core::{GenreId, Movie, MovieId, PersonId};

/// Movie list response (`/search/movie`, `/discover/movie`).
#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
}

/// A single movie result.
#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
}

impl From<MovieResult> for Movie {
    fn from(result: MovieResult) -> Self {
        Self {
            id: result.id,
            title: result.title,
            poster_path: result.poster_path,
            overview: result.overview.unwrap_or_default(),
            release_date: result.release_date.unwrap_or_default(),
        }
    }
}

/// Genre list response (`/genre/movie/list`).
#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A movie genre.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Person list response (`/search/person`).
#[derive(Debug, Deserialize)]
pub struct PersonListResponse {
    #[serde(default)]
    pub results: Vec<PersonResult>,
}

/// A single person result.
#[derive(Debug, Deserialize)]
pub struct PersonResult {
    pub id: PersonId,
    pub name: String,
}
