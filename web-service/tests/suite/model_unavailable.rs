//! The service keeps running without a model and says so on every request.

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::Value;
use serde_json::json;

use super::TestServer;
use super::core_fixture;

#[tokio::test]
async fn api_reports_model_not_loaded_every_time() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::with_artifacts(
        &dir.path().join("student_model.json"),
        &dir.path().join("label_encoder.json"),
    )
    .await;

    for _ in 0..2 {
        let resp = server
            .client
            .post(server.url("/api/predict"))
            .json(&json!({"study_hours": 8}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"error": "Model not loaded"}));
    }

    server.stop().await;
}

#[tokio::test]
async fn availability_is_checked_before_the_body() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::with_artifacts(
        &dir.path().join("student_model.json"),
        &dir.path().join("label_encoder.json"),
    )
    .await;

    let resp = server
        .client
        .post(server.url("/api/predict"))
        .json(&json!({"attendance": 150}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    server.stop().await;
}

#[tokio::test]
async fn form_shows_the_train_first_message() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("student_model.json");
    std::fs::write(&corrupt, "not a model").unwrap();
    let server =
        TestServer::with_artifacts(&corrupt, &core_fixture("label_encoder.json")).await;

    let resp = server
        .client
        .post(server.url("/predict"))
        .form(&[("study_hours", "8"), ("attendance", "95")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp.text().await.unwrap();
    assert!(
        body.contains("Model not loaded. Please train the model first."),
        "{body}"
    );

    let index = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);

    server.stop().await;
}
