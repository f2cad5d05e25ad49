//! Integration tests for the cart JSON API.
//!
//! Exercises the original backend contract: list, add (duplicate no-op),
//! remove-one, and remove-all, with the cart carried by the session cookie.

use axum::http::StatusCode;

use movie_store_integration_tests::{TestApp, movie_json};

#[tokio::test]
async fn test_cart_starts_empty() {
    let mut app = TestApp::spawn().await;

    let resp = app.get("/api/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), serde_json::json!([]));
}

#[tokio::test]
async fn test_add_echoes_movie_and_lists_it() {
    let mut app = TestApp::spawn().await;

    let resp = app
        .post_json("/api/cart", &movie_json(603, "The Matrix", "A hacker."))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["title"], "The Matrix");

    let resp = app.get("/api/cart").await;
    let items = resp.json();
    let items = items.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 603);
    assert_eq!(items[0]["poster_path"], "/poster-603.jpg");
}

#[tokio::test]
async fn test_duplicate_add_is_noop() {
    let mut app = TestApp::spawn().await;

    app.post_json("/api/cart", &movie_json(603, "The Matrix", "A hacker."))
        .await;
    app.post_json("/api/cart", &movie_json(603, "The Matrix", "A hacker."))
        .await;

    let resp = app.get("/api/cart").await;
    assert_eq!(resp.json().as_array().expect("array body").len(), 1);
}

#[tokio::test]
async fn test_remove_missing_id_leaves_cart_unchanged() {
    let mut app = TestApp::spawn().await;

    app.post_json("/api/cart", &movie_json(603, "The Matrix", "A hacker."))
        .await;

    let resp = app.delete("/api/cart/999").await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app.get("/api/cart").await;
    assert_eq!(resp.json().as_array().expect("array body").len(), 1);
}

#[tokio::test]
async fn test_remove_one_deletes_by_id() {
    let mut app = TestApp::spawn().await;

    app.post_json("/api/cart", &movie_json(603, "The Matrix", "A hacker."))
        .await;
    app.post_json("/api/cart", &movie_json(550, "Fight Club", "A clerk."))
        .await;

    let resp = app.delete("/api/cart/603").await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app.get("/api/cart").await;
    let items = resp.json();
    let items = items.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Fight Club");
}

#[tokio::test]
async fn test_remove_all_empties_cart() {
    let mut app = TestApp::spawn().await;

    app.post_json("/api/cart", &movie_json(603, "The Matrix", "A hacker."))
        .await;
    app.post_json("/api/cart", &movie_json(550, "Fight Club", "A clerk."))
        .await;

    let resp = app.delete("/api/cart").await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app.get("/api/cart").await;
    assert_eq!(resp.json(), serde_json::json!([]));
}
