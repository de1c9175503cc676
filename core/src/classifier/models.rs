//! Inference for the model families the artifact format can describe.
//!
//! Constructors validate structure up front so that prediction itself never
//! has to fail: node references point forward and stay in bounds, every row
//! has [`FEATURE_COUNT`] columns and all class distributions agree in width.

use crate::classifier::Classifier;
use crate::classifier::ProbabilisticClassifier;
use crate::classifier::artifacts::ArtifactError;
use crate::features::FEATURE_COUNT;
use crate::features::FEATURE_MAXIMA;
use crate::features::FeatureVector;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample weights reaching this leaf.
    Leaf { value: Vec<f64> },
}

/// CART-style binary decision tree rooted at node 0.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    n_classes: usize,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, ArtifactError> {
        if nodes.is_empty() {
            return Err(invalid("decision tree has no nodes"));
        }

        let mut n_classes = None;
        for (index, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(invalid(format!(
                            "node {index} splits on feature {feature}, only {FEATURE_COUNT} exist"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {index} has a non-finite threshold")));
                    }
                    for child in [left, right] {
                        if *child <= index || *child >= nodes.len() {
                            return Err(invalid(format!(
                                "node {index} points to invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    validate_distribution(index, value)?;
                    match n_classes {
                        None => n_classes = Some(value.len()),
                        Some(n) if n != value.len() => {
                            return Err(invalid(format!(
                                "leaf {index} has {} classes, expected {n}",
                                value.len()
                            )));
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        let n_classes = n_classes.ok_or_else(|| invalid("decision tree has no leaves"))?;
        Ok(Self { nodes, n_classes })
    }

    fn leaf(&self, x: &FeatureVector) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

impl Classifier for DecisionTree {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, x: &FeatureVector) -> usize {
        argmax(self.leaf(x))
    }
}

impl ProbabilisticClassifier for DecisionTree {
    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let value = self.leaf(x);
        let total: f64 = value.iter().sum();
        value.iter().map(|v| v / total).collect()
    }
}

/// Bagged trees; probabilities are the mean of the per-tree leaf distributions.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, ArtifactError> {
        let n_classes = trees
            .first()
            .map(Classifier::n_classes)
            .ok_or_else(|| invalid("random forest has no trees"))?;
        if let Some((index, tree)) = trees
            .iter()
            .enumerate()
            .find(|(_, tree)| tree.n_classes != n_classes)
        {
            return Err(invalid(format!(
                "tree {index} has {} classes, expected {n_classes}",
                tree.n_classes
            )));
        }
        Ok(Self { trees, n_classes })
    }
}

impl Classifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, x: &FeatureVector) -> usize {
        argmax(&self.predict_proba(x))
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in mean.iter_mut().zip(tree.predict_proba(x)) {
                *acc += p;
            }
        }
        let count = self.trees.len() as f64;
        mean.iter_mut().for_each(|p| *p /= count);
        mean
    }
}

/// Linear model with softmax output.
///
/// A single coefficient row is the binary form: it scores class 1 against
/// class 0 through the logistic function.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Vec<FeatureVector>,
    intercepts: Vec<f64>,
}

impl LogisticRegression {
    pub fn new(
        coefficients: Vec<FeatureVector>,
        intercepts: Vec<f64>,
    ) -> Result<Self, ArtifactError> {
        if coefficients.is_empty() {
            return Err(invalid("logistic regression has no coefficient rows"));
        }
        if coefficients.len() != intercepts.len() {
            return Err(invalid(format!(
                "{} coefficient rows but {} intercepts",
                coefficients.len(),
                intercepts.len()
            )));
        }
        let all_finite = coefficients.iter().flatten().chain(&intercepts).all(|v| v.is_finite());
        if !all_finite {
            return Err(invalid("logistic regression has non-finite parameters"));
        }
        // Features are bounded, so a finite bound here keeps every score finite
        // and the softmax free of `inf - inf`.
        let overflowing_row = coefficients.iter().zip(&intercepts).position(|(row, b)| {
            let bound = row
                .iter()
                .zip(FEATURE_MAXIMA)
                .map(|(w, max)| w.abs() * max)
                .sum::<f64>()
                + b.abs();
            !bound.is_finite()
        });
        if let Some(row) = overflowing_row {
            return Err(invalid(format!(
                "logistic regression row {row} can overflow to a non-finite score"
            )));
        }
        Ok(Self {
            coefficients,
            intercepts,
        })
    }

    fn decision(&self, x: &FeatureVector) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn n_classes(&self) -> usize {
        match self.coefficients.len() {
            1 => 2,
            n => n,
        }
    }

    fn predict(&self, x: &FeatureVector) -> usize {
        argmax(&self.predict_proba(x))
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        let scores = self.decision(x);
        if let [z] = scores.as_slice() {
            let p = 1.0 / (1.0 + (-z).exp());
            return vec![1.0 - p, p];
        }

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / total).collect()
    }
}

/// Assigns the class whose centroid is closest in Euclidean distance.
///
/// Has no notion of probability, so it is only ever loaded as a
/// deterministic classifier.
#[derive(Debug, Clone)]
pub struct NearestCentroid {
    centroids: Vec<FeatureVector>,
}

impl NearestCentroid {
    pub fn new(centroids: Vec<FeatureVector>) -> Result<Self, ArtifactError> {
        if centroids.is_empty() {
            return Err(invalid("nearest centroid model has no centroids"));
        }
        if !centroids.iter().flatten().all(|v| v.is_finite()) {
            return Err(invalid("nearest centroid model has non-finite centroids"));
        }
        Ok(Self { centroids })
    }
}

impl Classifier for NearestCentroid {
    fn n_classes(&self) -> usize {
        self.centroids.len()
    }

    fn predict(&self, x: &FeatureVector) -> usize {
        let distances: Vec<f64> = self
            .centroids
            .iter()
            .map(|c| -c.iter().zip(x).map(|(a, b)| (a - b).powi(2)).sum::<f64>())
            .collect();
        argmax(&distances)
    }
}

/// Index of the first maximum, like `numpy.argmax`.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

fn validate_distribution(index: usize, value: &[f64]) -> Result<(), ArtifactError> {
    if value.is_empty() {
        return Err(invalid(format!("leaf {index} has an empty class distribution")));
    }
    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(invalid(format!("leaf {index} has negative or non-finite weights")));
    }
    if value.iter().sum::<f64>() <= 0.0 {
        return Err(invalid(format!("leaf {index} has no weight")));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> ArtifactError {
    ArtifactError::InvalidModel(message.into())
}
