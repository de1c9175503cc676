//! The prediction pipeline shared by every entry point.

use serde::Serialize;

use crate::catalog::StudentTypeInfo;
use crate::catalog::describe;
use crate::classifier::ClassifierState;
use crate::classifier::ClassifyError;
use crate::classifier::PredictionResult;
use crate::features::StudentFeatures;
use crate::normalize::RawInput;
use crate::normalize::ValidationError;
use crate::normalize::normalize;

/// Everything a view needs to present one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub features: StudentFeatures,
    pub prediction: PredictionResult,
    pub info: &'static StudentTypeInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("model not loaded: {reason}")]
    ModelUnavailable { reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Classify(ClassifyError),
}

impl From<ClassifyError> for PipelineError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::ModelUnavailable { reason } => Self::ModelUnavailable { reason },
            other => Self::Classify(other),
        }
    }
}

/// Availability check, then normalize, classify and describe.
///
/// Invalid input never reaches the classifier.
pub fn assess(state: &ClassifierState, raw: &RawInput) -> Result<Assessment, PipelineError> {
    if let ClassifierState::Unavailable { reason } = state {
        return Err(PipelineError::ModelUnavailable {
            reason: reason.clone(),
        });
    }

    let features = normalize(raw)?;
    let prediction = state.classify(&features)?;
    let info = describe(&prediction.label);
    Ok(Assessment {
        features,
        prediction,
        info,
    })
}
