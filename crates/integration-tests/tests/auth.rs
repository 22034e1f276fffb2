//! Admin credential checks and public endpoints.

use reqwest::{Method, StatusCode, header};
use serde_json::{Value, json};
use showcase_api::db::Collection;
use showcase_integration_tests::{ADMIN_USERNAME, TestApp};

// ============================================================================
// Credentials
// ============================================================================

#[tokio::test]
async fn test_login_and_verify() {
    let app = TestApp::spawn().await;

    let login: Value = app
        .admin(Method::POST, "/api/auth/login")
        .send()
        .await
        .expect("Failed to log in")
        .json()
        .await
        .expect("Failed to parse login");
    assert_eq!(
        login,
        json!({"message": "Login successful", "username": ADMIN_USERNAME})
    );

    let verify: Value = app
        .admin(Method::GET, "/api/auth/verify")
        .send()
        .await
        .expect("Failed to verify")
        .json()
        .await
        .expect("Failed to parse verify");
    assert_eq!(verify, json!({"valid": true, "username": ADMIN_USERNAME}));
}

#[tokio::test]
async fn test_wrong_password_is_challenged() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/products"))
        .basic_auth(ADMIN_USERNAME, Some("wrong"))
        .json(&json!({"name": "Sneaky"}))
        .send()
        .await
        .expect("Failed to post product");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic")
    );
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body, json!({"detail": "Invalid credentials"}));
    assert_eq!(app.store.count(Collection::Products).await, 0);
}

async fn snapshot(app: &TestApp) -> Vec<Value> {
    let mut state = Vec::new();
    for path in [
        "/api/products",
        "/api/reviews",
        "/api/settings",
        "/api/settings/carousel",
        "/api/settings/features",
    ] {
        let body: Value = app
            .get(path)
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse body");
        state.push(body);
    }
    state
}

#[tokio::test]
async fn test_rejected_writes_leave_state_unchanged() {
    let app = TestApp::spawn().await;

    let product: Value = app
        .admin(Method::POST, "/api/products")
        .json(&json!({"name": "Ocean Coaster", "price": 40}))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Failed to parse product");
    let review: Value = app
        .admin(Method::POST, "/api/reviews")
        .json(&json!({"customer_name": "Asha", "rating": 5, "review_text": "Lovely"}))
        .send()
        .await
        .expect("Failed to create review")
        .json()
        .await
        .expect("Failed to parse review");
    app.admin(Method::PUT, "/api/settings")
        .json(&json!({"whatsapp": "15550001111"}))
        .send()
        .await
        .expect("Failed to put settings");
    app.admin(Method::PUT, "/api/settings/carousel")
        .json(&json!({"slides": [{"image": "https://img.test/1.jpg"}]}))
        .send()
        .await
        .expect("Failed to put carousel");

    let product_path = format!("/api/products/{}", product["_id"].as_str().expect("id"));
    let review_path = format!("/api/reviews/{}", review["_id"].as_str().expect("id"));
    let writes = [
        (Method::POST, "/api/products".to_string(), json!({"name": "Intruder"})),
        (Method::PUT, product_path.clone(), json!({"price": 1})),
        (Method::DELETE, product_path, Value::Null),
        (
            Method::POST,
            "/api/reviews".to_string(),
            json!({"customer_name": "X", "rating": 1, "review_text": "Bad"}),
        ),
        (Method::PUT, review_path.clone(), json!({"rating": 1})),
        (Method::DELETE, review_path, Value::Null),
        (Method::PUT, "/api/settings".to_string(), json!({"whatsapp": "0"})),
        (Method::PUT, "/api/settings/carousel".to_string(), json!({"slides": []})),
        (Method::PUT, "/api/settings/features".to_string(), json!({"cards": []})),
        (Method::POST, "/api/upload".to_string(), Value::Null),
        (Method::DELETE, "/api/upload/showcase/abc123".to_string(), Value::Null),
    ];

    let before = snapshot(&app).await;

    for (method, path, body) in &writes {
        for password in [None, Some("wrong")] {
            let mut request = app.client.request(method.clone(), app.url(path));
            if let Some(password) = password {
                request = request.basic_auth(ADMIN_USERNAME, Some(password));
            }
            if !body.is_null() {
                request = request.json(body);
            }

            let resp = request.send().await.expect("Failed to send request");

            assert_eq!(
                resp.status(),
                StatusCode::UNAUTHORIZED,
                "{method} {path} with password {password:?}"
            );
            assert_eq!(
                resp.headers()
                    .get(header::WWW_AUTHENTICATE)
                    .and_then(|v| v.to_str().ok()),
                Some("Basic"),
                "{method} {path}"
            );
        }
    }

    assert_eq!(snapshot(&app).await, before);
    assert_eq!(app.media.uploads(), 0);
    assert_eq!(app.media.deletions(), 0);
}

#[tokio::test]
async fn test_missing_credentials_beat_bad_body() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .put(app.url("/api/settings"))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to put settings");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["detail"], "Not authenticated");
}

#[tokio::test]
async fn test_reads_are_public() {
    let app = TestApp::spawn().await;

    for path in [
        "/api/products",
        "/api/reviews",
        "/api/settings",
        "/api/settings/carousel",
        "/api/settings/features",
    ] {
        let resp = app.get(path).send().await.expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::spawn().await;

    let root: Value = app
        .get("/")
        .send()
        .await
        .expect("Failed to get root")
        .json()
        .await
        .expect("Failed to parse root");
    assert_eq!(root["message"], "Showcase API");

    let live = app.get("/health").send().await.expect("Failed to get health");
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(live.text().await.expect("body"), "ok");

    let ready = app
        .get("/health/ready")
        .send()
        .await
        .expect("Failed to get readiness");
    assert_eq!(ready.status(), StatusCode::OK);

    let api: Value = app
        .get("/api/health")
        .send()
        .await
        .expect("Failed to get api health")
        .json()
        .await
        .expect("Failed to parse api health");
    assert_eq!(api, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::spawn().await;

    let resp = app.get("/api/nope").send().await.expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .patch(app.url("/api/products"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body, json!({"detail": "Method Not Allowed"}));
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = TestApp::spawn().await;

    let resp = app.get("/health").send().await.expect("Failed to get health");

    assert_eq!(
        resp.headers()
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}
