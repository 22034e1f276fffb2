//! Reviews over HTTP.

use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use showcase_api::db::Collection;
use showcase_integration_tests::TestApp;

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let app = TestApp::spawn().await;

    for rating in [0, 6] {
        let resp = app
            .admin(Method::POST, "/api/reviews")
            .json(&json!({
                "customer_name": "Asha",
                "rating": rating,
                "review_text": "Lovely work",
            }))
            .send()
            .await
            .expect("Failed to post review");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    assert_eq!(app.store.count(Collection::Reviews).await, 0);
}

#[tokio::test]
async fn test_review_create_update_and_featured() {
    let app = TestApp::spawn().await;

    let resp = app
        .admin(Method::POST, "/api/reviews")
        .json(&json!({
            "customer_name": "Asha",
            "rating": 5,
            "review_text": "Lovely work",
            "product_name": "Ocean Coaster",
        }))
        .send()
        .await
        .expect("Failed to post review");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let review: Value = resp.json().await.expect("Failed to parse review");
    let id = review["_id"].as_str().expect("id");

    let updated: Value = app
        .admin(Method::PUT, &format!("/api/reviews/{id}"))
        .json(&json!({"is_featured": true, "product_name": null}))
        .send()
        .await
        .expect("Failed to update review")
        .json()
        .await
        .expect("Failed to parse review");
    assert_eq!(updated["is_featured"], true);
    assert_eq!(updated["product_name"], Value::Null);
    assert_eq!(updated["rating"], 5);

    let featured: Vec<Value> = app
        .get("/api/reviews/featured")
        .send()
        .await
        .expect("Failed to list featured reviews")
        .json()
        .await
        .expect("Failed to parse list");
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0]["_id"], review["_id"]);
}

#[tokio::test]
async fn test_bad_rating_on_update_leaves_review_unchanged() {
    let app = TestApp::spawn().await;

    let review: Value = app
        .admin(Method::POST, "/api/reviews")
        .json(&json!({"customer_name": "Ravi", "rating": 4, "review_text": "Nice"}))
        .send()
        .await
        .expect("Failed to post review")
        .json()
        .await
        .expect("Failed to parse review");
    let path = format!("/api/reviews/{}", review["_id"].as_str().expect("id"));

    let resp = app
        .admin(Method::PUT, &path)
        .json(&json!({"rating": 9}))
        .send()
        .await
        .expect("Failed to update review");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let current: Value = app
        .get(&path)
        .send()
        .await
        .expect("Failed to get review")
        .json()
        .await
        .expect("Failed to parse review");
    assert_eq!(current, review);
}
