//! Integration tests for the backend relay routes.

mod helpers;

use axum::body::Body;
use http::{Request, StatusCode};
use mockito::Matcher;
use serde_json::json;

const SESSION: [(&str, &str); 2] = [("accessToken", "abc"), ("refreshToken", "r1")];

#[tokio::test]
async fn test_create_cart_relays_body() {
    let mut backend = mockito::Server::new_async().await;
    let mock = backend
        .mock("POST", "/api/cart")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Json(json!({ "customer": "walk-in" })))
        .with_status(201)
        .with_body(r#"{"id":9}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request("POST", "/api/cart", Some(json!({ "customer": "walk-in" })), &SESSION)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "id": 9 }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_backend_error_status_is_relayed() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("GET", "/api/purchase/4")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app.request("GET", "/api/purchase/4", None, &SESSION).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Failed to fetch purchase");
}

#[tokio::test]
async fn test_unreachable_backend_is_500() {
    let app = helpers::TestApp::new("http://127.0.0.1:1");
    let response = app.request("GET", "/api/cart", None, &SESSION).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["message"], "Internal Server Error");
}

#[tokio::test]
async fn test_cart_items_require_cart_id() {
    let mut backend = mockito::Server::new_async().await;
    let items = backend
        .mock("GET", "/api/cart-item/12")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_body(r#"[{"product_id":1,"quantity":2}]"#)
        .expect(1)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());

    let response = app.request("GET", "/api/cart-item", None, &SESSION).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Cart ID is required");

    let response = app
        .request("GET", "/api/cart-item?cartId=12", None, &SESSION)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["quantity"], 2);

    items.assert_async().await;
}

#[tokio::test]
async fn test_add_cart_item_is_validated() {
    let mut backend = mockito::Server::new_async().await;
    let mock = backend
        .mock("POST", "/api/cart-item/3")
        .expect(0)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "POST",
            "/api/cart-item/3",
            Some(json!({ "barcode": "", "quantity": 0 })),
            &SESSION,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("barcode"));
    assert!(message.contains("quantity"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_add_cart_item_forwards_valid_body() {
    let mut backend = mockito::Server::new_async().await;
    let mock = backend
        .mock("POST", "/api/cart-item/3")
        .match_body(Matcher::Json(json!({ "barcode": "899", "quantity": 2 })))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "POST",
            "/api/cart-item/3",
            Some(json!({ "barcode": "899", "quantity": 2 })),
            &SESSION,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_purchase_moves_cart_id_into_body() {
    let mut backend = mockito::Server::new_async().await;
    let mock = backend
        .mock("POST", "/api/purchase")
        .match_body(Matcher::Json(json!({
            "cart_id": 7,
            "paid": 50000.0,
            "payment_method": "cash"
        })))
        .with_status(200)
        .with_body(r#"{"code":200,"data":{"change":2500}}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "POST",
            "/api/purchase/7",
            Some(json!({ "paid": 50000.0, "payment_method": "cash" })),
            &SESSION,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["change"], 2500);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_purchase_rejects_non_numeric_cart() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app
        .request(
            "POST",
            "/api/purchase/abc",
            Some(json!({ "paid": 1.0, "payment_method": "cash" })),
            &SESSION,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_envelope_failure_code_is_relayed() {
    let mut backend = mockito::Server::new_async().await;
    backend
        .mock("POST", "/api/product")
        .with_status(200)
        .with_body(r#"{"code":409,"message":"barcode already exists"}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let response = app
        .request(
            "POST",
            "/api/product",
            Some(json!({
                "name": "Teh Botol",
                "barcode": "899",
                "stock": 10,
                "price": 5000.0,
                "discount": 0.0
            })),
            &SESSION,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "barcode already exists");
}

#[tokio::test]
async fn test_image_upload_relays_multipart() {
    let mut backend = mockito::Server::new_async().await;
    let body = "--xyz\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\n\r\nPNG\r\n--xyz--\r\n";
    let mock = backend
        .mock("POST", "/api/product/5/image")
        .match_header("authorization", "Bearer abc")
        .match_header("content-type", "multipart/form-data; boundary=xyz")
        .match_body(body)
        .with_status(200)
        .with_body(r#"{"code":200}"#)
        .create_async()
        .await;

    let app = helpers::TestApp::new(&backend.url());
    let req = Request::builder()
        .method("POST")
        .uri("/api/product/5/image")
        .header("content-type", "multipart/form-data; boundary=xyz")
        .header("cookie", "accessToken=abc; refreshToken=r1")
        .body(Body::from(body))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_health() {
    let backend = mockito::Server::new_async().await;
    let app = helpers::TestApp::new(&backend.url());

    let response = app.request("GET", "/api/health", None, &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
