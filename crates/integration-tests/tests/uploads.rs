//! Image uploads against a recording media host.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use showcase_integration_tests::TestApp;

fn image_form(bytes: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name("image")
        .mime_str(mime)
        .expect("valid mime type");
    Form::new().part("file", part)
}

#[tokio::test]
async fn test_upload_forwards_image() {
    let app = TestApp::spawn().await;

    let resp = app
        .admin(Method::POST, "/api/upload")
        .multipart(image_form(vec![0xFF; 2048], "image/png"))
        .send()
        .await
        .expect("Failed to upload");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse upload");
    assert_eq!(body["url"], "https://media.test/showcase/image-1.jpg");
    assert_eq!(body["public_id"], "showcase/image-1");
    assert_eq!(app.media.uploads(), 1);
}

#[tokio::test]
async fn test_oversized_upload_never_reaches_host() {
    let app = TestApp::spawn().await;

    let resp = app
        .admin(Method::POST, "/api/upload")
        .multipart(image_form(vec![0; 6 * 1024 * 1024], "image/jpeg"))
        .send()
        .await
        .expect("Failed to upload");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["detail"], "File too large. Maximum size is 5MB");
    assert_eq!(app.media.uploads(), 0);
}

#[tokio::test]
async fn test_unsupported_type_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .admin(Method::POST, "/api/upload")
        .multipart(image_form(b"%PDF-1.7".to_vec(), "application/pdf"))
        .send()
        .await
        .expect("Failed to upload");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["detail"], "Invalid file type. Allowed: JPEG, PNG, WebP, GIF");
    assert_eq!(app.media.uploads(), 0);
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/upload"))
        .multipart(image_form(vec![1; 16], "image/gif"))
        .send()
        .await
        .expect("Failed to upload");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.media.uploads(), 0);
}

#[tokio::test]
async fn test_delete_accepts_nested_identifiers() {
    let app = TestApp::spawn().await;

    let resp = app
        .admin(Method::DELETE, "/api/upload/showcase/abc123")
        .send()
        .await
        .expect("Failed to delete image");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body, json!({"message": "Image deleted successfully"}));

    let resp = app
        .admin(Method::DELETE, "/api/upload/showcase/missing")
        .send()
        .await
        .expect("Failed to delete image");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["detail"], "Failed to delete image");

    assert_eq!(app.media.deletions(), 2);
}
