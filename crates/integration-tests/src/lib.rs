//! Integration tests for the Movies Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p movie-store-integration-tests
//! ```
//!
//! Tests drive the real storefront router in-process with an in-memory
//! `SQLite` database, tracking the session cookie across requests the way a
//! browser would. The catalog and purchase-log endpoints point at an
//! unroutable local port, so remote calls fail fast and exercise the
//! fallback paths (empty results, swallowed purchase-log failures).

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use secrecy::SecretString;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use movie_store_storefront::config::{CatalogConfig, StorefrontConfig};
use movie_store_storefront::state::AppState;
use movie_store_storefront::{db, middleware, routes};

/// Nothing listens on this port; remote calls fail immediately.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

/// Configuration for an in-process test storefront.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("parse host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        catalog: CatalogConfig {
            api_base: DEAD_ENDPOINT.to_string(),
            image_base: "https://image.tmdb.org/t/p/w500".to_string(),
            api_key: SecretString::from("test-key"),
        },
        purchase_log_url: format!("{DEAD_ENDPOINT}/debug/purchases"),
    }
}

/// A response captured from the in-process router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, for redirect assertions.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// An in-process storefront with a browser-like cookie jar.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the storefront against a fresh in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database or session layer cannot be set up.
    pub async fn spawn() -> Self {
        let config = test_config();

        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("connect in-memory database");
        db::MIGRATOR.run(&pool).await.expect("run migrations");

        let state = AppState::new(config, pool.clone());
        let session_layer = middleware::create_session_layer(&pool, state.config())
            .await
            .expect("create session layer");

        let router = routes::routes().layer(session_layer).with_state(state);

        Self {
            router,
            cookie: None,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call");

        let status = response.status();
        let headers = response.headers().clone();

        // Track the session cookie like a browser would
        if let Some(set_cookie) = headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn builder(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    /// GET a page or API resource.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .builder("GET", uri)
            .body(Body::empty())
            .expect("build request");
        self.send(request).await
    }

    /// POST an HTML form.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .builder("POST", uri)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(encode_form(fields)))
            .expect("build request");
        self.send(request).await
    }

    /// POST a JSON body.
    pub async fn post_json(&mut self, uri: &str, body: &serde_json::Value) -> TestResponse {
        let request = self
            .builder("POST", uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request");
        self.send(request).await
    }

    /// DELETE a resource.
    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        let request = self
            .builder("DELETE", uri)
            .body(Body::empty())
            .expect("build request");
        self.send(request).await
    }
}

/// Encode form fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// JSON body for adding a movie through the cart API.
#[must_use]
pub fn movie_json(id: i64, title: &str, overview: &str) -> serde_json::Value {
    serde_json::json!({
        "movie": {
            "id": id,
            "title": title,
            "poster_path": format!("/poster-{id}.jpg"),
            "overview": overview,
            "release_date": "1999-03-30",
        }
    })
}
