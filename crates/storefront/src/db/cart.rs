//! Cart repository for database operations.
//!
//! Each cart is a list of movies keyed by the session's cart id. Entry
//! uniqueness is enforced by the `UNIQUE (cart_id, movie_id)` constraint, so
//! adding a movie twice is a no-op at the store level.

use sqlx::SqlitePool;
use uuid::Uuid;

use movie_store_core::{Movie, MovieId};

use super::RepositoryError;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

/// Row shape for cart listings.
#[derive(sqlx::FromRow)]
struct CartRow {
    movie_id: MovieId,
    title: String,
    poster_path: Option<String>,
    overview: String,
    release_date: String,
}

impl From<CartRow> for Movie {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.movie_id,
            title: row.title,
            poster_path: row.poster_path,
            overview: row.overview,
            release_date: row.release_date,
        }
    }
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the movies in a cart, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, cart_id: Uuid) -> Result<Vec<Movie>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT movie_id, title, poster_path, overview, release_date
             FROM cart_items
             WHERE cart_id = ?
             ORDER BY id",
        )
        .bind(cart_id.to_string())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    /// Add a movie to a cart.
    ///
    /// Returns `true` if the movie was inserted, `false` if it was already
    /// present (duplicate adds are a no-op).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, cart_id: Uuid, movie: &Movie) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO cart_items
                (cart_id, movie_id, title, poster_path, overview, release_date)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(cart_id.to_string())
        .bind(movie.id)
        .bind(&movie.title)
        .bind(movie.poster_path.as_deref())
        .bind(&movie.overview)
        .bind(&movie.release_date)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a movie from a cart by id.
    ///
    /// Removing an id that is not present leaves the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, cart_id: Uuid, movie_id: MovieId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ? AND movie_id = ?")
            .bind(cart_id.to_string())
            .bind(movie_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove every movie from a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, cart_id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?")
            .bind(cart_id.to_string())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count the entries in a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, cart_id: Uuid) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_items WHERE cart_id = ?")
                .bind(cart_id.to_string())
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("connect in-memory database");
        super::super::MIGRATOR
            .run(&pool)
            .await
            .expect("run migrations");
        pool
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: title.to_string(),
            poster_path: Some(format!("/poster-{id}.jpg")),
            overview: "A movie.".to_string(),
            release_date: "1999-03-30".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_preserves_insertion_order() {
        let pool = test_pool().await;
        let repo = CartRepository::new(&pool);
        let cart = Uuid::new_v4();

        assert!(repo.add(cart, &movie(2, "Second")).await.unwrap());
        assert!(repo.add(cart, &movie(1, "First")).await.unwrap());

        let items = repo.list(cart).await.unwrap();
        let titles: Vec<_> = items.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_noop() {
        let pool = test_pool().await;
        let repo = CartRepository::new(&pool);
        let cart = Uuid::new_v4();

        assert!(repo.add(cart, &movie(603, "The Matrix")).await.unwrap());
        assert!(!repo.add(cart, &movie(603, "The Matrix")).await.unwrap());

        assert_eq!(repo.count(cart).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_id_leaves_cart_unchanged() {
        let pool = test_pool().await;
        let repo = CartRepository::new(&pool);
        let cart = Uuid::new_v4();

        repo.add(cart, &movie(603, "The Matrix")).await.unwrap();

        let removed = repo.remove(cart, MovieId::new(999)).await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(repo.count(cart).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_deletes_by_id() {
        let pool = test_pool().await;
        let repo = CartRepository::new(&pool);
        let cart = Uuid::new_v4();

        repo.add(cart, &movie(603, "The Matrix")).await.unwrap();
        repo.add(cart, &movie(550, "Fight Club")).await.unwrap();

        let removed = repo.remove(cart, MovieId::new(603)).await.unwrap();
        assert_eq!(removed, 1);

        let items = repo.list(cart).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().title, "Fight Club");
    }

    #[tokio::test]
    async fn test_clear_empties_only_that_cart() {
        let pool = test_pool().await;
        let repo = CartRepository::new(&pool);
        let cart = Uuid::new_v4();
        let other = Uuid::new_v4();

        repo.add(cart, &movie(603, "The Matrix")).await.unwrap();
        repo.add(cart, &movie(550, "Fight Club")).await.unwrap();
        repo.add(other, &movie(603, "The Matrix")).await.unwrap();

        let removed = repo.clear(cart).await.unwrap();
        assert_eq!(removed, 2);
        assert!(repo.list(cart).await.unwrap().is_empty());
        assert_eq!(repo.count(other).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_round_trips_movie_fields() {
        let pool = test_pool().await;
        let repo = CartRepository::new(&pool);
        let cart = Uuid::new_v4();

        let original = movie(603, "The Matrix");
        repo.add(cart, &original).await.unwrap();

        let items = repo.list(cart).await.unwrap();
        assert_eq!(items, vec![original]);
    }
}
