//! JSON bodies for `POST /api/predict`.

use serde::Deserialize;
use serde::Serialize;
use student_type_core::Assessment;

/// Fixed message for the unavailable-model response.
pub const MODEL_NOT_LOADED: &str = "Model not loaded";

/// 200: prediction succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub prediction: String,
    /// Percent, rounded to two decimals.
    pub confidence: f64,
    pub description: String,
}

impl From<&Assessment> for PredictResponse {
    fn from(assessment: &Assessment) -> Self {
        Self {
            success: true,
            prediction: assessment.prediction.label.clone(),
            confidence: assessment.prediction.rounded_confidence(),
            description: assessment.info.description.to_string(),
        }
    }
}

/// 400 for bad input, 500 for unexpected classification failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// 500: no model was loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelNotLoadedResponse {
    pub error: String,
}

impl Default for ModelNotLoadedResponse {
    fn default() -> Self {
        Self {
            error: MODEL_NOT_LOADED.to_string(),
        }
    }
}
