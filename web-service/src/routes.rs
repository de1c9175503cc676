//! HTTP handlers.
//!
//! Every handler turns its failures into a response here; nothing escapes to
//! the transport layer as an error.

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use student_type_core::PipelineError;
use student_type_core::RawInput;
use student_type_core::assess;

use crate::AppState;
use crate::api::FailureResponse;
use crate::api::ModelNotLoadedResponse;
use crate::api::PredictResponse;
use crate::views;
use crate::views::AboutPage;
use crate::views::IndexPage;
use crate::views::ResultPage;

pub const MODEL_NOT_LOADED_PAGE: &str = "Model not loaded. Please train the model first.";

/// `GET /`
pub async fn index() -> Response {
    views::render(&IndexPage::new(), StatusCode::OK)
}

/// `GET /about`
pub async fn about() -> Response {
    views::render(&AboutPage::new(), StatusCode::OK)
}

/// Any unmatched route.
pub async fn not_found() -> Response {
    views::error_page(StatusCode::NOT_FOUND, views::NOT_FOUND_MESSAGE)
}

/// `POST /predict` with a form-encoded body.
pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let raw = match form {
        Ok(Form(pairs)) => RawInput::from_pairs(pairs),
        Err(rejection) => {
            tracing::warn!("Rejected form submission: {rejection}");
            return views::error_page(
                StatusCode::BAD_REQUEST,
                format!("An error occurred: {}", rejection.body_text()),
            );
        }
    };

    match assess(&state.classifier, &raw) {
        Ok(assessment) => {
            tracing::debug!(
                label = %assessment.prediction.label,
                confidence = assessment.prediction.confidence,
                "form prediction"
            );
            views::render(&ResultPage::from(&assessment), StatusCode::OK)
        }
        Err(PipelineError::ModelUnavailable { .. }) => {
            views::error_page(StatusCode::INTERNAL_SERVER_ERROR, MODEL_NOT_LOADED_PAGE)
        }
        Err(PipelineError::Validation(err)) => {
            tracing::debug!("Invalid form input: {err}");
            views::error_page(StatusCode::BAD_REQUEST, format!("Invalid input: {err}"))
        }
        Err(err @ PipelineError::Classify(_)) => {
            tracing::warn!("Form prediction failed: {err}");
            views::error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {err}"),
            )
        }
    }
}

/// `POST /api/predict` with a JSON object body.
pub async fn api_predict(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    if !state.classifier.is_available() {
        return model_not_loaded();
    }

    let object = match body {
        Ok(Json(serde_json::Value::Object(object))) => object,
        Ok(Json(other)) => {
            return bad_request(format!(
                "request body must be a JSON object, got {}",
                json_kind(&other)
            ));
        }
        Err(rejection) => {
            tracing::debug!("Rejected API body: {rejection}");
            return bad_request(rejection.body_text());
        }
    };

    match assess(&state.classifier, &RawInput::from_json_object(object)) {
        Ok(assessment) => {
            tracing::debug!(
                label = %assessment.prediction.label,
                confidence = assessment.prediction.confidence,
                "api prediction"
            );
            (StatusCode::OK, Json(PredictResponse::from(&assessment))).into_response()
        }
        Err(PipelineError::ModelUnavailable { .. }) => model_not_loaded(),
        Err(PipelineError::Validation(err)) => bad_request(err.to_string()),
        Err(err @ PipelineError::Classify(_)) => {
            tracing::warn!("API prediction failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new(err.to_string())),
            )
                .into_response()
        }
    }
}

fn model_not_loaded() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ModelNotLoadedResponse::default()),
    )
        .into_response()
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(FailureResponse::new(error))).into_response()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
