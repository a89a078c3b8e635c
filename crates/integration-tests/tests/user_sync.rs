//! End-to-end tests for the user synchronization contract.
//!
//! A form posts records, a list view reads them back. These tests drive a real
//! server over TCP through the typed client.

use roster_core::{Email, UserRecord};
use roster_integration_tests::TestContext;
use serde_json::{Value, json};

fn user(first: &str, last: &str, email: &str) -> UserRecord {
    UserRecord::new(first, last, Email::parse(email).expect("test email is valid"))
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_fresh_server_has_no_users() {
    let ctx = TestContext::start().await;
    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert!(users.is_empty());
}

// =============================================================================
// Create then list
// =============================================================================

#[tokio::test]
async fn test_created_user_is_listed_verbatim() {
    let ctx = TestContext::start().await;

    let ack = ctx
        .client
        .create_user(&user("Ada", "Lovelace", "ada@x.com"))
        .await
        .expect("create user");
    assert_eq!(ack, "user added");

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert_eq!(
        users,
        vec![json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com" })]
    );
}

#[tokio::test]
async fn test_two_users_listed_in_post_order() {
    let ctx = TestContext::start().await;
    let ada = user("Ada", "Lovelace", "ada@x.com");
    let grace = user("Grace", "Hopper", "grace@navy.mil");

    ctx.client.create_user(&ada).await.expect("create ada");
    ctx.client.create_user(&grace).await.expect("create grace");

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0], ada.to_value());
    assert_eq!(users[1], grace.to_value());
}

#[tokio::test]
async fn test_n_users_keep_order_and_duplicates() {
    let ctx = TestContext::start().await;
    let submitted: Vec<UserRecord> = (0..10)
        .map(|i| user(&format!("User{}", i % 3), "Tester", &format!("u{}@x.com", i % 3)))
        .collect();

    for record in &submitted {
        ctx.client.create_user(record).await.expect("create user");
    }

    let users = ctx.client.fetch_users().await.expect("fetch users");
    let expected: Vec<Value> = submitted.iter().map(UserRecord::to_value).collect();
    assert_eq!(users, expected);
}

#[tokio::test]
async fn test_listed_users_decode_as_records() {
    let ctx = TestContext::start().await;
    let ada = user("Ada", "Lovelace", "ada@x.com");
    ctx.client.create_user(&ada).await.expect("create user");

    let users = ctx.client.fetch_users().await.expect("fetch users");
    let decoded: UserRecord =
        serde_json::from_value(users[0].clone()).expect("listed user is a record");
    assert_eq!(decoded, ada);
}

#[tokio::test]
async fn test_concurrent_creates_are_all_stored() {
    let ctx = TestContext::start().await;

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = ctx.client.clone();
            tokio::spawn(async move {
                client
                    .create_user(&user("Parallel", &i.to_string(), "p@x.com"))
                    .await
            })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked").expect("create user");
    }

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert_eq!(users.len(), 20);
}

// =============================================================================
// Permissive intake
// =============================================================================

#[tokio::test]
async fn test_body_without_user_stores_null() {
    let ctx = TestContext::start().await;

    let response = ctx
        .client
        .post_raw(r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@x.com"}"#)
        .await
        .expect("post");
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<String>().await.expect("ack"), "user added");

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert_eq!(users, vec![Value::Null]);
}

#[tokio::test]
async fn test_arbitrary_user_shape_is_stored_verbatim() {
    let ctx = TestContext::start().await;

    let response = ctx
        .client
        .post_raw(r#"{"user":{"handle":"ada","tags":["math"]}}"#)
        .await
        .expect("post");
    assert_eq!(response.status(), 200);

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert_eq!(users, vec![json!({ "handle": "ada", "tags": ["math"] })]);
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let ctx = TestContext::start().await;

    let response = ctx.client.post_raw("firstName=Ada").await.expect("post");
    assert_eq!(response.status(), 400);

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_form_encoded_submission_stores_null() {
    let ctx = TestContext::start().await;

    let response = ctx
        .client
        .post_as("application/x-www-form-urlencoded", "firstName=Ada")
        .await
        .expect("post");
    assert_eq!(response.status(), 200);
    let ack: String = response.json().await.expect("ack");
    assert_eq!(ack, "user added");

    let response = ctx
        .client
        .post_as("text/plain", "hello")
        .await
        .expect("post");
    assert_eq!(response.status(), 200);

    let users = ctx.client.fetch_users().await.expect("fetch users");
    assert_eq!(users, vec![Value::Null, Value::Null]);
}

#[tokio::test]
async fn test_each_server_has_its_own_store() {
    let first = TestContext::start().await;
    let second = TestContext::start().await;

    first
        .client
        .create_user(&user("Ada", "Lovelace", "ada@x.com"))
        .await
        .expect("create user");

    assert_eq!(first.client.fetch_users().await.expect("fetch").len(), 1);
    assert!(second.client.fetch_users().await.expect("fetch").is_empty());
}
