//! On-disk model and label-encoder artifacts.
//!
//! Both files are JSON exported by the training notebook:
//!
//! ```text
//! label_encoder.json   {"classes": ["All-Rounder", "Backbencher", "Crammer", "Topper"]}
//! student_model.json   {"kind": "decision_tree", "nodes": [...]}
//!                      {"kind": "random_forest", "trees": [{"nodes": [...]}, ...]}
//!                      {"kind": "logistic_regression", "coefficients": [[...6]], "intercepts": [...]}
//!                      {"kind": "nearest_centroid", "centroids": [[...6]]}
//! ```
//!
//! Tree nodes are either `{"feature", "threshold", "left", "right"}` or a
//! leaf `{"value": [per-class weights]}`.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::classifier::Model;
use crate::classifier::label_decoder::LabelDecoder;
use crate::classifier::models::DecisionTree;
use crate::classifier::models::LogisticRegression;
use crate::classifier::models::NearestCentroid;
use crate::classifier::models::RandomForest;
use crate::classifier::models::TreeNode;
use crate::features::FEATURE_COUNT;
use crate::features::FeatureVector;

/// Errors from reading or interpreting artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("label encoder has no classes")]
    EmptyEncoder,

    #[error("model predicts {model} classes but the label encoder knows {encoder}")]
    ClassCountMismatch { model: usize, encoder: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    DecisionTree(TreeArtifact),
    RandomForest {
        trees: Vec<TreeArtifact>,
    },
    LogisticRegression {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
    NearestCentroid {
        centroids: Vec<Vec<f64>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoderArtifact {
    pub classes: Vec<String>,
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DecisionTree(_) => "decision_tree",
            Self::RandomForest { .. } => "random_forest",
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::NearestCentroid { .. } => "nearest_centroid",
        }
    }

    /// Build the runtime model, choosing its capability once.
    pub fn into_model(self) -> Result<Model, ArtifactError> {
        Ok(match self {
            Self::DecisionTree(tree) => Model::Probabilistic(Box::new(tree.into_tree()?)),
            Self::RandomForest { trees } => {
                let trees = trees
                    .into_iter()
                    .map(TreeArtifact::into_tree)
                    .collect::<Result<Vec<_>, _>>()?;
                Model::Probabilistic(Box::new(RandomForest::new(trees)?))
            }
            Self::LogisticRegression {
                coefficients,
                intercepts,
            } => Model::Probabilistic(Box::new(LogisticRegression::new(
                rows(coefficients, "coefficient")?,
                intercepts,
            )?)),
            Self::NearestCentroid { centroids } => {
                Model::Deterministic(Box::new(NearestCentroid::new(rows(centroids, "centroid")?)?))
            }
        })
    }
}

impl TreeArtifact {
    fn into_tree(self) -> Result<DecisionTree, ArtifactError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| match node {
                NodeArtifact::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                },
                NodeArtifact::Leaf { value } => TreeNode::Leaf { value },
            })
            .collect();
        DecisionTree::new(nodes)
    }
}

impl LabelEncoderArtifact {
    pub fn into_decoder(self) -> Result<LabelDecoder, ArtifactError> {
        LabelDecoder::new(self.classes)
    }
}

pub fn read_model(path: &Path) -> Result<ModelArtifact, ArtifactError> {
    read_json(path)
}

pub fn read_label_encoder(path: &Path) -> Result<LabelEncoderArtifact, ArtifactError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn rows(values: Vec<Vec<f64>>, what: &str) -> Result<Vec<FeatureVector>, ArtifactError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            FeatureVector::try_from(row.as_slice()).map_err(|_| {
                ArtifactError::InvalidModel(format!(
                    "{what} row {index} has {} columns, expected {FEATURE_COUNT}",
                    row.len()
                ))
            })
        })
        .collect()
}
