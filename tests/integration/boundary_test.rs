//! Integration tests for page boundary enforcement.

mod helpers;

use http::StatusCode;
use mockito::Matcher;

#[tokio::test]
async fn test_protected_page_without_session_redirects_to_login() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app.request("GET", "/dashboard", None, &[]).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/login"));

    let response = app.request("GET", "/dashboard/history", None, &[]).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_expired_refresh_redirects_to_login() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app
        .request(
            "GET",
            "/product",
            None,
            &[
                ("accessToken", "abc"),
                ("refreshToken", "r1"),
                ("refreshValidUntil", "2020-01-01T00:00:00.000Z"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_login_page_with_session_redirects_to_dashboard() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app
        .request(
            "GET",
            "/login",
            None,
            &[("accessToken", "abc"), ("refreshToken", "r1")],
        )
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/dashboard"));
}

#[tokio::test]
async fn test_unprotected_page_passes_through() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app.request("GET", "/purchase/3", None, &[]).await;
    assert_ne!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert!(response.location().is_none());

    let response = app.request("GET", "/login", None, &[]).await;
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_boundary_refresh_is_shared_with_handler() {
    let mut backend = mockito::Server::new_async().await;
    let refresh = backend
        .mock("POST", "/api/refresh")
        .with_status(200)
        .with_body(helpers::refresh_success())
        .expect(1)
        .create_async()
        .await;
    let products = backend
        .mock("GET", "/api/product")
        .match_header("authorization", "Bearer new-a")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"code":200,"data":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "GET",
            "/api/product?page=2",
            None,
            &[
                ("refreshToken", "r1"),
                ("refreshValidUntil", "2031-01-01T00:00:00.000Z"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.set_cookies().len(), 4);
    assert_eq!(response.cookie("accessToken").unwrap().value(), "new-a");

    refresh.assert_async().await;
    products.assert_async().await;
}

#[tokio::test]
async fn test_failed_boundary_refresh_redirects_to_login() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/refresh")
        .with_status(200)
        .with_body(r#"{"code":401}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request("GET", "/dashboard", None, &[("refreshToken", "r1")])
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/login"));
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_boundary_refresh_rotates_cookies_on_pages() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/refresh")
        .with_status(200)
        .with_body(helpers::refresh_success())
        .expect(1)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request("GET", "/dashboard", None, &[("refreshToken", "r1")])
        .await;

    assert!(response.location().is_none());
    assert_eq!(response.set_cookies().len(), 4);
}

#[tokio::test]
async fn test_boundary_rotated_token_is_forwarded_verbatim() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/refresh")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "code": 200,
                "data": {
                    "access": "tok%41en",
                    "access_valid_until": "2030-01-01T00:00:00Z",
                    "refresh": "new-r",
                    "refresh_valid_until": "2031-01-01T00:00:00Z"
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let carts = backend
        .mock("GET", "/api/cart")
        .match_header("authorization", "Bearer tok%41en")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let page = app
        .request("GET", "/dashboard", None, &[("refreshToken", "r1")])
        .await;
    assert_eq!(page.cookie("accessToken").unwrap().value(), "tok%41en");

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/cart")
        .header(http::header::COOKIE, page.echoed_cookie_header())
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookies().is_empty());
    carts.assert_async().await;
}
