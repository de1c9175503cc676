//! Classifier adapter.
//!
//! Wraps a trained model and its label decoder behind one call,
//! [`ClassifierState::classify`], that maps validated features to a label and
//! a confidence in `[0, 100]`.
//!
//! The state is built once at startup and never changes afterwards. Missing
//! or broken artifacts put it in [`ClassifierState::Unavailable`]; every
//! classification then fails with the same [`ClassifyError::ModelUnavailable`]
//! until the process restarts with valid files.

pub mod artifacts;
pub mod label_decoder;
pub mod models;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::features::FeatureVector;
use crate::features::StudentFeatures;
pub use artifacts::ArtifactError;
pub use label_decoder::LabelDecoder;

/// Reported confidence when the model exposes no class probabilities.
///
/// This is a fixed stand-in, not a measurement.
pub const UNKNOWN_CONFIDENCE: f64 = 95.0;

/// Categorical prediction over the fixed feature vector.
pub trait Classifier: Send + Sync {
    /// Number of encoded classes the model can emit.
    fn n_classes(&self) -> usize;

    /// Encoded class index for `x`.
    fn predict(&self, x: &FeatureVector) -> usize;
}

/// A classifier that can also report per-class probabilities.
pub trait ProbabilisticClassifier: Classifier {
    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Probabilistic,
    Deterministic,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probabilistic => f.write_str("probabilistic"),
            Self::Deterministic => f.write_str("deterministic"),
        }
    }
}

/// A loaded model with its capability fixed at load time.
pub enum Model {
    Probabilistic(Box<dyn ProbabilisticClassifier>),
    Deterministic(Box<dyn Classifier>),
}

impl Model {
    pub fn capability(&self) -> Capability {
        match self {
            Self::Probabilistic(_) => Capability::Probabilistic,
            Self::Deterministic(_) => Capability::Deterministic,
        }
    }

    pub fn n_classes(&self) -> usize {
        match self {
            Self::Probabilistic(model) => model.n_classes(),
            Self::Deterministic(model) => model.n_classes(),
        }
    }

    /// Encoded class plus confidence in percent.
    fn predict(&self, x: &FeatureVector) -> (usize, f64) {
        match self {
            Self::Probabilistic(model) => {
                let encoded = model.predict(x);
                let max = model
                    .predict_proba(x)
                    .into_iter()
                    .fold(0.0_f64, f64::max);
                (encoded, (max * 100.0).clamp(0.0, 100.0))
            }
            Self::Deterministic(model) => (model.predict(x), UNKNOWN_CONFIDENCE),
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("capability", &self.capability())
            .field("n_classes", &self.n_classes())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("model not loaded: {reason}")]
    ModelUnavailable { reason: String },

    #[error("model predicted class {encoded}, but the label decoder only knows {known}")]
    UnknownClass { encoded: usize, known: usize },
}

/// Label and confidence for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: String,
    /// Percent in `[0, 100]`; [`UNKNOWN_CONFIDENCE`] for deterministic models.
    pub confidence: f64,
}

impl PredictionResult {
    /// Confidence rounded to two decimals for display.
    pub fn rounded_confidence(&self) -> f64 {
        (self.confidence * 100.0).round() / 100.0
    }
}

/// Model and decoder that agree on the number of classes.
#[derive(Debug)]
pub struct LoadedClassifier {
    model: Model,
    decoder: LabelDecoder,
}

impl LoadedClassifier {
    pub fn new(model: Model, decoder: LabelDecoder) -> Result<Self, ArtifactError> {
        if model.n_classes() != decoder.len() {
            return Err(ArtifactError::ClassCountMismatch {
                model: model.n_classes(),
                encoder: decoder.len(),
            });
        }
        Ok(Self { model, decoder })
    }

    pub fn capability(&self) -> Capability {
        self.model.capability()
    }

    pub fn classes(&self) -> &[String] {
        self.decoder.classes()
    }

    pub fn classify(&self, features: &StudentFeatures) -> Result<PredictionResult, ClassifyError> {
        let (encoded, confidence) = self.model.predict(&features.to_vector());
        let label = self.decoder.inverse_transform(encoded)?;
        tracing::debug!(label, confidence, "classified {features:?}");
        Ok(PredictionResult {
            label: label.to_string(),
            confidence,
        })
    }
}

/// Process-wide classifier, fixed at startup.
#[derive(Debug)]
pub enum ClassifierState {
    Ready(LoadedClassifier),
    Unavailable { reason: String },
}

impl ClassifierState {
    /// Load both artifacts; any failure yields [`ClassifierState::Unavailable`].
    pub fn load(model_path: &Path, encoder_path: &Path) -> Self {
        match Self::try_load(model_path, encoder_path) {
            Ok(loaded) => {
                tracing::info!(
                    "Model loaded from {} ({} classifier, classes: {})",
                    model_path.display(),
                    loaded.capability(),
                    loaded.classes().join(", ")
                );
                Self::Ready(loaded)
            }
            Err(err) => {
                tracing::warn!("Model unavailable: {err}");
                Self::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn try_load(
        model_path: &Path,
        encoder_path: &Path,
    ) -> Result<LoadedClassifier, ArtifactError> {
        let artifact = artifacts::read_model(model_path)?;
        tracing::debug!("Read {} artifact from {}", artifact.kind(), model_path.display());
        let model = artifact.into_model()?;
        let decoder = artifacts::read_label_encoder(encoder_path)?.into_decoder()?;
        LoadedClassifier::new(model, decoder)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Fails identically on every call while the model is unavailable.
    pub fn classify(&self, features: &StudentFeatures) -> Result<PredictionResult, ClassifyError> {
        match self {
            Self::Ready(loaded) => loaded.classify(features),
            Self::Unavailable { reason } => Err(ClassifyError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}

impl From<LoadedClassifier> for ClassifierState {
    fn from(loaded: LoadedClassifier) -> Self {
        Self::Ready(loaded)
    }
}
