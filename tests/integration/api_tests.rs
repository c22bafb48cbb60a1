//! Live API tests against a running server and database

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Find the id of the most recently listed book with the given title
async fn find_book_id(client: &Client, title: &str) -> Option<i64> {
    let body: Value = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("searchTerm", title), ("page", "0"), ("bksToDisplay", "100")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    body["books"]
        .as_array()?
        .iter()
        .filter(|b| b["title"] == title)
        .filter_map(|b| b["id"].as_i64())
        .max()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let response = client()
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].is_array());
    assert!(body["total"].is_number());
    assert!(body["buttons"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_book() {
    let client = client();
    let title = "Live Test Book 1999";

    let response = client
        .post(format!("{}/books/new-book", BASE_URL))
        .form(&[("title", title), ("author", "Tester"), ("genre", "Test"), ("year", "1999")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let id = find_book_id(&client, title).await.expect("Created book not listed");

    let response = client
        .post(format!("{}/books/{}/update-book", BASE_URL, id))
        .form(&[("title", title), ("author", ""), ("genre", ""), ("year", "")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .post(format!("{}/books/{}/delete", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_create_invalid_book() {
    let response = client()
        .post(format!("{}/books/new-book", BASE_URL))
        .form(&[("title", ""), ("author", "Nobody")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["field"], "title");
    assert_eq!(body["book"]["author"], "Nobody");
}
