//! The movie catalog record.

use serde::{Deserialize, Serialize};

use super::id::MovieId;

/// A movie as returned by the remote catalog service.
///
/// Immutable once fetched; the store never creates movies of its own. Field
/// names follow the catalog wire format so the record round-trips through the
/// cart API unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Poster image path, relative to the catalog's image base URL.
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "The Matrix",
                "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
                "overview": "Set in the 22nd century.",
                "release_date": "1999-03-30"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(movie.id, MovieId::new(603));
        assert_eq!(movie.title, "The Matrix");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": 1, "title": "Untitled", "poster_path": null}"#)
                .expect("deserialize");
        assert!(movie.poster_path.is_none());
        assert!(movie.overview.is_empty());
        assert!(movie.release_date.is_empty());
    }
}
