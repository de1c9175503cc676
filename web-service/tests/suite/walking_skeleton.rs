//! End-to-end over real HTTP with the fixture model loaded.

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::Value;
use serde_json::json;

use super::TestServer;

const TOPPER_FORM: [(&str, &str); 6] = [
    ("study_hours", "8"),
    ("attendance", "95"),
    ("assignments", "yes"),
    ("social_media", "1"),
    ("sleep_hours", "7"),
    ("backlogs", "no"),
];

#[tokio::test]
async fn index_and_about_render() {
    let server = TestServer::with_fixture_model().await;

    let index = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    let body = index.text().await.unwrap();
    assert!(body.contains("action=\"/predict\""), "{body}");

    let about = server.client.get(server.url("/about")).send().await.unwrap();
    assert_eq!(about.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn form_prediction_renders_result_page() {
    let server = TestServer::with_fixture_model().await;

    let resp = server
        .client
        .post(server.url("/predict"))
        .form(&TOPPER_FORM[..])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Topper"), "{body}");
    assert!(body.contains("🏆"));
    assert!(body.contains("93.75%"));

    server.stop().await;
}

#[tokio::test]
async fn form_with_out_of_range_value_is_rejected() {
    let server = TestServer::with_fixture_model().await;

    let mut form = TOPPER_FORM;
    form[1] = ("attendance", "150");
    let resp = server
        .client
        .post(server.url("/predict"))
        .form(&form[..])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Invalid input: attendance must be between 0 and 100"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn form_with_unreadable_body_is_rejected() {
    let server = TestServer::with_fixture_model().await;

    let resp = server
        .client
        .post(server.url("/predict"))
        .header("content-type", "text/plain")
        .body("x")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.unwrap();
    assert!(body.contains("An error occurred: "), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn api_prediction_returns_json() {
    let server = TestServer::with_fixture_model().await;

    let resp = server
        .client
        .post(server.url("/api/predict"))
        .json(&json!({
            "study_hours": 8,
            "attendance": "95",
            "assignments": "Yes",
            "social_media": 1,
            "sleep_hours": 7,
            "backlogs": "no"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "prediction": "Topper",
            "confidence": 93.75,
            "description": "You are a dedicated and consistent learner!"
        })
    );

    server.stop().await;
}

#[tokio::test]
async fn api_validation_failure_is_a_400() {
    let server = TestServer::with_fixture_model().await;

    let resp = server
        .client
        .post(server.url("/api/predict"))
        .json(&json!({"study_hours": 8, "attendance": 150}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(
        body["error"].as_str().unwrap().contains("attendance"),
        "{body}"
    );

    server.stop().await;
}

#[tokio::test]
async fn api_rejects_non_object_bodies() {
    let server = TestServer::with_fixture_model().await;

    let array = server
        .client
        .post(server.url("/api/predict"))
        .json(&json!([1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(array.status(), StatusCode::BAD_REQUEST);

    let malformed = server
        .client
        .post(server.url("/api/predict"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    let body: Value = malformed.json().await.unwrap();
    assert_eq!(body["success"], json!(false));

    server.stop().await;
}

#[tokio::test]
async fn unknown_route_gets_the_404_page() {
    let server = TestServer::with_fixture_model().await;

    let resp = server
        .client
        .get(server.url("/no/such/page"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("Page not found (404)"));

    server.stop().await;
}
