//! A model that emits a class index its label decoder does not know.

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::Value;
use serde_json::json;
use student_type_core::ClassifierState;
use student_type_core::classifier::Classifier;
use student_type_core::classifier::LabelDecoder;
use student_type_core::classifier::LoadedClassifier;
use student_type_core::classifier::Model;
use student_type_core::features::FeatureVector;

use super::TestServer;

/// Claims one class but always answers with index 7.
struct OutOfRange;

impl Classifier for OutOfRange {
    fn n_classes(&self) -> usize {
        1
    }

    fn predict(&self, _x: &FeatureVector) -> usize {
        7
    }
}

async fn server() -> TestServer {
    let decoder = LabelDecoder::new(vec!["Topper".to_string()]).unwrap();
    let model = Model::Deterministic(Box::new(OutOfRange));
    let loaded = LoadedClassifier::new(model, decoder).unwrap();
    TestServer::start(ClassifierState::from(loaded)).await
}

#[tokio::test]
async fn api_reports_decode_failure_as_500() {
    let server = server().await;

    let resp = server
        .client
        .post(server.url("/api/predict"))
        .json(&json!({"study_hours": 8, "attendance": 95}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "model predicted class 7, but the label decoder only knows 1"
        })
    );

    server.stop().await;
}

#[tokio::test]
async fn form_reports_decode_failure_as_500() {
    let server = server().await;

    let resp = server
        .client
        .post(server.url("/predict"))
        .form(&[("study_hours", "8"), ("attendance", "95")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp.text().await.unwrap();
    assert!(body.contains("An error occurred: "), "{body}");
    assert!(body.contains("class 7"), "{body}");

    server.stop().await;
}
