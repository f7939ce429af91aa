mod common;

use auth::Claims;
use auth::JwtHandler;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::TEST_HMAC_SECRET;
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "email": "johndoe@example.com",
            "password": "pass_word!",
            "firstName": "John",
            "lastName": "Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Success");
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict_and_leaves_no_residue() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "email": "johndoe@example.com",
            "password": "another_password",
            "firstName": "Jane",
            "lastName": "Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Exactly one user row and one credential row survive the second attempt
    let (users, credentials): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT count(*) FROM users WHERE email = $1),
            (SELECT count(*) FROM password_credentials)
        "#,
    )
    .bind("johndoe@example.com")
    .fetch_one(&app.db.pool)
    .await
    .unwrap();
    assert_eq!(users, 1);
    assert_eq!(credentials, 1);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!",
            "firstName": "John",
            "lastName": "Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "JSON parse failed");
}

#[tokio::test]
async fn test_login_establishes_a_session() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "email": "johndoe@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("set-cookie"));

    // The cookie jar now authenticates /user/session
    let response = app.get("/user/session").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["lastName"], "Doe");
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email_alike() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let wrong_password = app
        .post("/auth/login")
        .json(&json!({
            "email": "johndoe@example.com",
            "password": "wrong_password"
        }))
        .send()
        .await
        .unwrap();

    let unknown_email = app
        .post("/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password_body: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email_body: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password_body, unknown_email_body);
}

#[tokio::test]
async fn test_user_session_without_cookie() {
    let app = TestApp::spawn().await;

    let response = app.get("/user/session").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_destroys_the_session() {
    let app = TestApp::spawn().await;
    app.register_and_login("johndoe@example.com", "pass_word!")
        .await;

    let response = app.post("/auth/logout").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/user/session").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_corrupted_session_is_rejected_and_destroyed() {
    let app = TestApp::spawn().await;

    // Plant a session whose user_id is not a UUID
    sqlx::query(
        r#"
        INSERT INTO sessions (token, data, expires_at)
        VALUES ($1, jsonb_build_object('user_id', 'garbage'), now() + interval '1 hour')
        "#,
    )
    .bind("corrupt-token")
    .execute(&app.db.pool)
    .await
    .unwrap();

    let response = app
        .get("/user/session")
        .header("cookie", "session=corrupt-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The repair destroyed the corrupted row
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sessions WHERE token = $1)")
            .bind("corrupt-token")
            .fetch_one(&app.db.pool)
            .await
            .unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn test_basic_auth_success() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let response = app
        .get("/user/basic")
        .basic_auth("johndoe@example.com", Some("pass_word!"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["lastName"], "Doe");
}

#[tokio::test]
async fn test_basic_auth_failures_all_answer_the_same_challenge() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    // Missing header
    let missing = app.get("/user/basic").send().await.unwrap();
    // Malformed payload
    let malformed = app
        .get("/user/basic")
        .header("authorization", "Basic not-base64!!!")
        .send()
        .await
        .unwrap();
    // Wrong password
    let wrong = app
        .get("/user/basic")
        .basic_auth("johndoe@example.com", Some("wrong_password"))
        .send()
        .await
        .unwrap();

    for response in [missing, malformed, wrong] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            r#"Basic realm="user""#
        );
    }
}

#[tokio::test]
async fn test_token_login_round_trip() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let response = app
        .post("/auth/token/login")
        .json(&json!({
            "email": "johndoe@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["accessToken"].as_str().unwrap();
    assert!(!token.is_empty());

    let response = app
        .get("/user/token")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["firstName"], "John");
}

#[tokio::test]
async fn test_token_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let response = app
        .post("/auth/token/login")
        .json(&json!({
            "email": "johndoe@example.com",
            "password": "wrong_password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_token_rejects_bad_tokens() {
    let app = TestApp::spawn().await;
    app.register_user("johndoe@example.com", "pass_word!").await;

    let subject = uuid::Uuid::new_v4().to_string();

    // Signed with a foreign secret
    let foreign = JwtHandler::new(b"some-other-secret-key-at-least-32-bytes!")
        .encode(
            &Claims::new()
                .with_subject(&subject)
                .with_expiration((Utc::now() + Duration::hours(1)).timestamp()),
        )
        .unwrap();
    // Signed with the server's secret but already expired
    let expired = app
        .jwt_handler
        .encode(
            &Claims::new()
                .with_subject(&subject)
                .with_expiration((Utc::now() - Duration::hours(1)).timestamp()),
        )
        .unwrap();

    for token in [foreign.as_str(), expired.as_str(), "garbage"] {
        let response = app
            .get("/user/token")
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "token: {token}");
    }

    // Missing header entirely
    let response = app.get("/user/token").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_well_signed_token_with_bad_subject_is_a_server_error() {
    let app = TestApp::spawn().await;

    let token = JwtHandler::new(TEST_HMAC_SECRET)
        .encode(
            &Claims::new()
                .with_subject("not-a-uuid")
                .with_expiration((Utc::now() + Duration::hours(1)).timestamp()),
        )
        .unwrap();

    let response = app
        .get("/user/token")
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_api_key_round_trip() {
    let app = TestApp::spawn().await;
    app.register_and_login("johndoe@example.com", "pass_word!")
        .await;

    let response = app.get("/auth/api-key").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let api_key = body["apiKey"].as_str().unwrap();
    let (public_id, secret) = api_key.split_once('.').unwrap();
    assert_eq!(public_id.len(), 16);
    assert_eq!(secret.len(), 64);

    let response = app
        .get("/user/api-key")
        .header("x-api-key", api_key)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["firstName"], "John");
}

#[tokio::test]
async fn test_api_key_rejects_tampered_secret_and_unknown_public_id() {
    let app = TestApp::spawn().await;
    app.register_and_login("johndoe@example.com", "pass_word!")
        .await;

    let body: serde_json::Value = app
        .get("/auth/api-key")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let api_key = body["apiKey"].as_str().unwrap();
    let (public_id, _) = api_key.split_once('.').unwrap();

    let tampered = format!("{public_id}.{}", "f".repeat(64));
    let unknown = format!("{}.{}", "0".repeat(16), "f".repeat(64));

    for key in [tampered, unknown] {
        let response = app
            .get("/user/api-key")
            .header("x-api-key", &key)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "key: {key}");
    }
}

#[tokio::test]
async fn test_api_key_wrong_shape_is_a_format_error() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/user/api-key")
        .header("x-api-key", "no-separator-here")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .get("/user/api-key")
        .header("x-api-key", "too.many.segments")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_key_missing_header() {
    let app = TestApp::spawn().await;

    let response = app.get("/user/api-key").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_api_key_requires_a_session() {
    let app = TestApp::spawn().await;

    let response = app.get("/auth/api-key").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
