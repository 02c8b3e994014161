use enroll_adapters::http::routes::ErrorResponse;
use enroll_application::{DispatchFailurePolicy, UserResponse};
use fake::{Fake, faker::internet::en::SafeEmail};

use crate::helpers::TestApp;

fn registration(name: &str, email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "password": password,
    })
}

#[tokio::test]
async fn should_return_201_with_the_new_user() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    let response = app
        .post_register(&registration("John Doe", &email, "StrongP@ss123"))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    let user: UserResponse = serde_json::from_value(body.clone()).unwrap();

    assert_eq!(user.name, "John Doe");
    assert_eq!(user.email, email);
    assert_eq!(user.created_at, "2024-06-01 10:00:00");
    assert!(uuid::Uuid::parse_str(&user.id).is_ok());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn should_return_409_if_email_already_registered() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    let first = app
        .post_register(&registration("John Doe", &email, "StrongP@ss123"))
        .await;
    assert_eq!(first.status().as_u16(), 201);

    let second = app
        .post_register(&registration("Someone Else", &email, "0ther!Secret"))
        .await;
    assert_eq!(second.status().as_u16(), 409);

    let error: ErrorResponse = second.json().await.unwrap();
    assert_eq!(error.error, format!("Email already in use: {email}"));
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        (
            registration("John Doe", "invalid-email", "StrongP@ss123"),
            "Invalid input: Invalid email format",
        ),
        (
            registration("J", "john@example.com", "StrongP@ss123"),
            "Invalid input: Name must be at least 2 characters long",
        ),
        (
            registration("John 2", "john@example.com", "StrongP@ss123"),
            "Invalid input: Name can only contain letters and spaces",
        ),
        (
            registration("John Doe", "john@example.com", "Sh0rt!"),
            "Invalid input: Password must be at least 8 characters long",
        ),
        (
            registration("John Doe", "john@example.com", "alllowercase1!"),
            "Invalid input: Password must contain at least one uppercase letter, one number, and one special character",
        ),
    ];

    for (body, expected) in test_cases.iter() {
        let response = app.post_register(body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");

        let error: ErrorResponse = response.json().await.unwrap();
        assert_eq!(error.error, *expected);
    }
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        serde_json::json!({ "email": "john@example.com", "password": "StrongP@ss123" }),
        serde_json::json!({ "name": "John Doe", "password": "StrongP@ss123" }),
        serde_json::json!({ "name": "John Doe", "email": "john@example.com" }),
        serde_json::json!({ "name": 42, "email": "john@example.com", "password": "x" }),
    ];

    for body in test_cases.iter() {
        let response = app.post_register(body).await;
        assert_eq!(response.status().as_u16(), 422, "Failed for input: {body}");
    }
}

#[tokio::test]
async fn should_keep_user_when_notification_fails_by_default() {
    let app = TestApp::with_failing_handler(DispatchFailurePolicy::LogAndContinue).await;
    let email: String = SafeEmail().fake();

    let response = app
        .post_register(&registration("John Doe", &email, "StrongP@ss123"))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let again = app
        .post_register(&registration("John Doe", &email, "StrongP@ss123"))
        .await;
    assert_eq!(again.status().as_u16(), 409);
}

#[tokio::test]
async fn should_return_500_but_keep_user_when_notification_failure_propagates() {
    let app = TestApp::with_failing_handler(DispatchFailurePolicy::Propagate).await;
    let email: String = SafeEmail().fake();

    let response = app
        .post_register(&registration("John Doe", &email, "StrongP@ss123"))
        .await;
    assert_eq!(response.status().as_u16(), 500);

    let again = app
        .post_register(&registration("John Doe", &email, "StrongP@ss123"))
        .await;
    assert_eq!(again.status().as_u16(), 409);
}
