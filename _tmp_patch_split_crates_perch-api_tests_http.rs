//! Integration tests: drive the router with in-memory requests and verify
//! status codes and bodies against the endpoint contracts.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use perch_api::AppStateInner;
use perch_db::Database;

fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    perch_api::router(Arc::new(AppStateInner { db }))
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Bytes) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

/// Registers an account and returns its JSON, panicking on failure.
async fn register(app: &Router, username: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/register",
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

/// Creates a message and returns its JSON, panicking on failure.
async fn post_message(app: &Router, text: &str, posted_by: i64) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/messages",
        Some(json!({ "messageText": text, "postedBy": posted_by })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn register_rejects_blank_or_missing_username() {
    let app = app();
    for body in [
        json!({ "username": "", "password": "pass1" }),
        json!({ "username": "   ", "password": "pass1" }),
        json!({ "username": null, "password": "pass1" }),
        json!({ "password": "pass1" }),
    ] {
        let (status, bytes) = send(&app, "POST", "/register", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(&bytes[..], b"Username cannot be blank.");
    }
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = app();
    for body in [
        json!({ "username": "alice", "password": "abc" }),
        json!({ "username": "alice", "password": null }),
        json!({ "username": "alice" }),
    ] {
        let (status, bytes) = send(&app, "POST", "/register", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(&bytes[..], b"Password must be at least 4 characters long.");
    }
}

#[tokio::test]
async fn register_assigns_id_and_echoes_the_account() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;
    assert_eq!(account["id"], 1);
    assert_eq!(account["username"], "alice");
    assert_eq!(account["password"], "pass1");
}

#[tokio::test]
async fn duplicate_username_conflicts_and_leaves_first_account_alone() {
    let app = app();
    register(&app, "alice", "pass1").await;

    let (status, bytes) = send(
        &app,
        "POST",
        "/register",
        Some(json!({ "username": "alice", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(&bytes[..], b"Username already exists.");

    // The original credentials still log in.
    let (status, body) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "alice", "password": "pass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let account: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(account["password"], "pass1");
}

#[tokio::test]
async fn login_returns_the_stored_account() {
    let app = app();
    let registered = register(&app, "alice", "pass1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "alice", "password": "pass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let account: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(account, registered);
}

#[tokio::test]
async fn login_with_wrong_or_unknown_credentials_is_unauthorized() {
    let app = app();
    register(&app, "alice", "pass1").await;

    for body in [
        json!({ "username": "alice", "password": "wrong" }),
        json!({ "username": "nobody", "password": "pass1" }),
    ] {
        let (status, bytes) = send(&app, "POST", "/login", Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(&bytes[..], b"Invalid username or password.");
    }
}

#[tokio::test]
async fn login_validates_fields_before_looking_anything_up() {
    let app = app();
    let (status, bytes) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": " ", "password": "pass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&bytes[..], b"Username cannot be blank.");
}

#[tokio::test]
async fn create_message_requires_an_existing_poster() {
    let app = app();
    let (status, bytes) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "messageText": "hi", "postedBy": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&bytes[..], b"PostedBy (user ID) cannot be null. User does not exist.");

    // Nothing was persisted.
    let (status, body) = send(&app, "GET", "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    let messages: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(messages, json!([]));
}

#[tokio::test]
async fn create_message_rejects_blank_text() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;

    let (status, bytes) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "messageText": "  ", "postedBy": account["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&bytes[..], b"Message text cannot be blank.");
}

#[tokio::test]
async fn message_text_boundary_is_255_characters() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;
    let id = account["id"].as_i64().unwrap();

    let at_limit = "x".repeat(255);
    let message = post_message(&app, &at_limit, id).await;
    assert_eq!(message["messageText"], at_limit.as_str());

    let over_limit = "x".repeat(256);
    let (status, bytes) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({ "messageText": over_limit, "postedBy": id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&bytes[..], b"Message text cannot exceed 255 characters.");
}

#[tokio::test]
async fn create_message_stamps_posted_at_when_omitted() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;

    let message = post_message(&app, "hi", account["id"].as_i64().unwrap()).await;
    assert!(message["postedAt"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_message_keeps_a_client_supplied_timestamp() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({
            "messageText": "hi",
            "postedBy": account["id"],
            "postedAt": 1_700_000_000_000_i64,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let message: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(message["postedAt"], 1_700_000_000_000_i64);
}

#[tokio::test]
async fn get_message_by_id_is_empty_success_on_miss() {
    let app = app();
    let (status, bytes) = send(&app, "GET", "/messages/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn deleting_a_missing_message_twice_is_an_idempotent_no_op() {
    let app = app();
    for _ in 0..2 {
        let (status, bytes) = send(&app, "DELETE", "/messages/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(bytes.is_empty());
    }
}

#[tokio::test]
async fn update_changes_only_the_text() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;
    let message = post_message(&app, "first", account["id"].as_i64().unwrap()).await;
    let id = message["id"].as_i64().unwrap();

    let (status, bytes) = send(
        &app,
        "PATCH",
        &format!("/messages/{id}"),
        Some(json!({ "messageText": "second" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"1");

    let (_, body) = send(&app, "GET", &format!("/messages/{id}"), None).await;
    let updated: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["messageText"], "second");
    assert_eq!(updated["id"], message["id"]);
    assert_eq!(updated["postedBy"], message["postedBy"]);
    assert_eq!(updated["postedAt"], message["postedAt"]);
}

#[tokio::test]
async fn update_of_a_missing_message_is_an_error() {
    let app = app();
    let (status, bytes) = send(
        &app,
        "PATCH",
        "/messages/42",
        Some(json!({ "messageText": "new text" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&bytes[..], b"Message not found.");
}

#[tokio::test]
async fn update_validates_text_before_checking_existence() {
    let app = app();
    let (status, bytes) = send(
        &app,
        "PATCH",
        "/messages/42",
        Some(json!({ "messageText": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&bytes[..], b"Message text cannot be blank.");
}

#[tokio::test]
async fn account_messages_are_empty_even_for_unknown_accounts() {
    let app = app();

    // Unknown account id.
    let (status, body) = send(&app, "GET", "/accounts/999/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

    // Known account with no messages.
    let account = register(&app, "alice", "pass1").await;
    let path = format!("/accounts/{}/messages", account["id"]);
    let (status, body) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn account_messages_only_include_that_poster() {
    let app = app();
    let alice = register(&app, "alice", "pass1").await;
    let bob = register(&app, "bob", "pass2").await;
    let alice_id = alice["id"].as_i64().unwrap();
    let bob_id = bob["id"].as_i64().unwrap();

    post_message(&app, "from alice", alice_id).await;
    post_message(&app, "from bob", bob_id).await;
    post_message(&app, "alice again", alice_id).await;

    let (status, body) = send(&app, "GET", &format!("/accounts/{alice_id}/messages"), None).await;
    assert_eq!(status, StatusCode::OK);
    let messages: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["postedBy"] == alice_id));
}

#[tokio::test]
async fn register_post_fetch_delete_round_trip() {
    let app = app();

    let alice = register(&app, "alice", "pass1").await;
    let alice_id = alice["id"].as_i64().unwrap();
    assert!(alice_id > 0);

    let message = post_message(&app, "hi", alice_id).await;
    let message_id = message["id"].as_i64().unwrap();
    assert!(message_id > 0);

    let (status, body) = send(&app, "GET", &format!("/messages/{message_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), message);

    let (status, bytes) = send(&app, "DELETE", &format!("/messages/{message_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"1");

    let (status, bytes) = send(&app, "GET", &format!("/messages/{message_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn get_all_messages_returns_every_stored_message() {
    let app = app();
    let account = register(&app, "alice", "pass1").await;
    let id = account["id"].as_i64().unwrap();

    let first = post_message(&app, "one", id).await;
    let second = post_message(&app, "two", id).await;

    let (status, body) = send(&app, "GET", "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    let messages: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.contains(&first));
    assert!(messages.contains(&second));
}


