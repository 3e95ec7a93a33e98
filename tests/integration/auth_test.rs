//! Integration tests for login, logout and the explicit refresh endpoint.

mod helpers;

use http::StatusCode;
use http::header::ALLOW;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_logout_expires_all_cookies() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app
        .request("POST", "/api/logout", None, &[("accessToken", "abc")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");

    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 4);
    for name in ["accessToken", "accessValidUntil", "refreshToken", "refreshValidUntil"] {
        let cookie = response.cookie(name).unwrap();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.expires_datetime().map(|t| t.unix_timestamp()),
            Some(0)
        );
    }
}

#[tokio::test]
async fn test_logout_other_methods_are_405() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app.request("GET", "/api/logout", None, &[]).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, json!({ "error": "Method not allowed" }));
    assert_eq!(response.headers.get(ALLOW).unwrap(), "POST");
}

#[tokio::test]
async fn test_login_sets_session_cookies() {
    let mut backend = mockito::Server::new_async().await;
    let mock = backend
        .mock("POST", "/api/login")
        .match_body(Matcher::Json(json!({ "username": "kasir", "password": "secret" })))
        .with_status(200)
        .with_body(helpers::refresh_success())
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": "kasir", "password": "secret" })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.set_cookies().len(), 4);
    assert_eq!(response.cookie("refreshToken").unwrap().value(), "new-r");
    assert!(response.body.get("accessToken").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_rejected_is_401() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/login")
        .with_status(200)
        .with_body(r#"{"code":400,"message":"Invalid credentials"}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": "kasir", "password": "wrong" })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_login_requires_fields() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app
        .request("POST", "/api/login", Some(json!({ "username": "", "password": "" })), &[])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_token_endpoint_returns_pair() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/refresh")
        .match_body(Matcher::Json(json!({ "refresh": "r1" })))
        .with_status(200)
        .with_body(helpers::refresh_success())
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request("POST", "/api/refresh-token", Some(json!({ "refreshToken": "r1" })), &[])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "accessToken": "new-a",
            "accessValidUntil": "2030-01-01T00:00:00.000Z",
            "refreshToken": "new-r",
            "refreshValidUntil": "2031-01-01T00:00:00.000Z"
        })
    );
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_refresh_token_endpoint_rejection_is_401() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/refresh")
        .with_status(200)
        .with_body(r#"{"code":401}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());

    let response = app
        .request("POST", "/api/refresh-token", Some(json!({ "refreshToken": "r1" })), &[])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Failed to refresh token");

    let response = app
        .request("POST", "/api/refresh-token", Some(json!({})), &[])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
