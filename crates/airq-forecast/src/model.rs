//! Gradient-boosted tree ensemble loaded from a JSON model document
//!
//! Document layout:
//!
//! ```json
//! {
//!   "name": "forecast_classifier_v1",
//!   "num_features": 4,
//!   "num_classes": 6,
//!   "base_score": 0.5,
//!   "trees": [
//!     { "class": 0, "nodes": [
//!         { "feature": 0, "threshold": 9.05, "yes": 1, "no": 2 },
//!         { "leaf": 1.0 },
//!         { "leaf": 0.0 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A split sends the walk to `yes` when `x[feature] < threshold`, else to `no`.
//! Each class score is `base_score` plus the leaves reached in that class's trees,
//! and the predicted category is the highest-scoring class.

use crate::classifier::{category_from_raw, CategoryClassifier};
use crate::error::{ClassifierError, ModelLoadError};
use crate::types::{Category, FeatureVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    pub name: String,
    pub num_features: usize,
    pub num_classes: usize,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<TreeDocument>,
}

/// One regression tree contributing to a single class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDocument {
    pub class: usize,
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf {
        leaf: f64,
    },
}

/// Multi-class tree ensemble classifier
#[derive(Debug, Clone)]
pub struct TreeEnsembleClassifier {
    document: ModelDocument,
}

impl TreeEnsembleClassifier {
    /// Load and validate a model file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let classifier = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            trees = classifier.document.trees.len(),
            "Loaded tree ensemble"
        );
        Ok(classifier)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let document: ModelDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_document(document: ModelDocument) -> Result<Self, ModelLoadError> {
        validate(&document)?;
        Ok(Self { document })
    }

    pub fn num_trees(&self) -> usize {
        self.document.trees.len()
    }

    /// Per-class scores for a raw feature slice
    pub fn predict_scores(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if features.len() != self.document.num_features {
            return Err(ClassifierError::FeatureCount {
                expected: self.document.num_features,
                actual: features.len(),
            });
        }

        let mut scores = vec![self.document.base_score; self.document.num_classes];
        for tree in &self.document.trees {
            scores[tree.class] += walk(&tree.nodes, features);
        }
        Ok(scores)
    }
}

impl CategoryClassifier for TreeEnsembleClassifier {
    fn name(&self) -> &str {
        &self.document.name
    }

    fn classify(&self, features: &FeatureVector) -> Result<Category, ClassifierError> {
        let scores = self.predict_scores(features.as_slice())?;

        // first maximum wins ties
        let mut best = 0;
        for (class, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = class;
            }
        }
        category_from_raw(best as i64)
    }
}

fn walk(nodes: &[TreeNode], features: &[f64]) -> f64 {
    let mut at = 0;
    loop {
        match &nodes[at] {
            TreeNode::Leaf { leaf } => return *leaf,
            TreeNode::Split {
                feature,
                threshold,
                yes,
                no,
            } => {
                at = if features[*feature] < *threshold { *yes } else { *no };
            }
        }
    }
}

fn validate(document: &ModelDocument) -> Result<(), ModelLoadError> {
    if document.num_features != FeatureVector::LEN {
        return Err(ModelLoadError::Invalid(format!(
            "model expects {} features, synthesizer produces {}",
            document.num_features,
            FeatureVector::LEN
        )));
    }
    let categories = Category::MAX as usize + 1;
    if document.num_classes != categories {
        return Err(ModelLoadError::Invalid(format!(
            "model has {} classes, severity scale has {}",
            document.num_classes, categories
        )));
    }
    if document.trees.is_empty() {
        return Err(ModelLoadError::Invalid("model has no trees".to_string()));
    }
    if !document.base_score.is_finite() {
        return Err(ModelLoadError::Invalid("base_score must be finite".to_string()));
    }

    for (t, tree) in document.trees.iter().enumerate() {
        if tree.class >= document.num_classes {
            return Err(ModelLoadError::Invalid(format!(
                "tree {} targets class {}",
                t, tree.class
            )));
        }
        if tree.nodes.is_empty() {
            return Err(ModelLoadError::Invalid(format!("tree {} has no nodes", t)));
        }
        for (n, node) in tree.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { leaf } if !leaf.is_finite() => {
                    return Err(ModelLoadError::Invalid(format!(
                        "tree {} node {} has a non-finite leaf",
                        t, n
                    )));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature, yes, no, ..
                } => {
                    if *feature >= document.num_features {
                        return Err(ModelLoadError::Invalid(format!(
                            "tree {} node {} splits on feature {}",
                            t, n, feature
                        )));
                    }
                    // children strictly after the parent rules out cycles
                    for child in [*yes, *no] {
                        if child <= n || child >= tree.nodes.len() {
                            return Err(ModelLoadError::Invalid(format!(
                                "tree {} node {} has invalid child {}",
                                t, n, child
                            )));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED: &str = include_str!("../../../models/forecast_classifier_v1.json");

    fn stump(class: usize, threshold: f64) -> TreeDocument {
        TreeDocument {
            class,
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold,
                    yes: 1,
                    no: 2,
                },
                TreeNode::Leaf { leaf: 1.0 },
                TreeNode::Leaf { leaf: -1.0 },
            ],
        }
    }

    fn document(trees: Vec<TreeDocument>) -> ModelDocument {
        ModelDocument {
            name: "test".to_string(),
            num_features: 4,
            num_classes: 6,
            base_score: 0.0,
            trees,
        }
    }

    #[test]
    fn test_bundled_model_loads() {
        let model = TreeEnsembleClassifier::from_json(BUNDLED).unwrap();
        assert_eq!(model.name(), "forecast_classifier_v1");
        assert_eq!(model.num_trees(), 6);
    }

    #[test]
    fn test_bundled_model_buckets_pm25() {
        let model = TreeEnsembleClassifier::from_json(BUNDLED).unwrap();
        let cases = [
            (4.0, 0),
            (20.0, 1),
            (40.0, 2),
            (80.0, 3),
            (150.0, 4),
            (300.0, 5),
            (1e12, 5),
        ];
        for (pm25, expected) in cases {
            let category = model
                .classify(&FeatureVector::new(pm25, 20.0, 60.0, 5.0))
                .unwrap();
            assert_eq!(category.value(), expected, "pm25 = {}", pm25);
        }
    }

    #[test]
    fn test_scores_sum_leaves() {
        let model =
            TreeEnsembleClassifier::from_document(document(vec![stump(2, 50.0), stump(2, 80.0)]))
                .unwrap();
        let scores = model.predict_scores(&[60.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(scores[2], 0.0);
        let scores = model.predict_scores(&[10.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(scores[2], 2.0);
    }

    #[test]
    fn test_ties_pick_lowest_class() {
        let model =
            TreeEnsembleClassifier::from_document(document(vec![stump(3, 50.0), stump(1, 50.0)]))
                .unwrap();
        let category = model
            .classify(&FeatureVector::new(10.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(category.value(), 1);
    }

    #[test]
    fn test_feature_count_checked() {
        let model = TreeEnsembleClassifier::from_document(document(vec![stump(0, 1.0)])).unwrap();
        assert!(matches!(
            model.predict_scores(&[1.0, 2.0]),
            Err(ClassifierError::FeatureCount {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let mut doc = document(vec![stump(0, 1.0)]);
        doc.num_features = 5;
        assert!(matches!(
            TreeEnsembleClassifier::from_document(doc),
            Err(ModelLoadError::Invalid(_))
        ));

        let mut doc = document(vec![stump(0, 1.0)]);
        doc.num_classes = 3;
        assert!(TreeEnsembleClassifier::from_document(doc).is_err());

        assert!(TreeEnsembleClassifier::from_document(document(vec![])).is_err());
        assert!(TreeEnsembleClassifier::from_document(document(vec![stump(6, 1.0)])).is_err());
    }

    #[test]
    fn test_rejects_cycles_and_dangling_children() {
        let mut tree = stump(0, 1.0);
        tree.nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 1.0,
            yes: 0,
            no: 2,
        };
        assert!(TreeEnsembleClassifier::from_document(document(vec![tree])).is_err());

        let mut tree = stump(0, 1.0);
        tree.nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 1.0,
            yes: 1,
            no: 9,
        };
        assert!(TreeEnsembleClassifier::from_document(document(vec![tree])).is_err());
    }

    #[test]
    fn test_rejects_unknown_feature() {
        let mut tree = stump(0, 1.0);
        tree.nodes[0] = TreeNode::Split {
            feature: 4,
            threshold: 1.0,
            yes: 1,
            no: 2,
        };
        assert!(TreeEnsembleClassifier::from_document(document(vec![tree])).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            TreeEnsembleClassifier::from_json("{ not json"),
            Err(ModelLoadError::Parse(_))
        ));
        assert!(matches!(
            TreeEnsembleClassifier::from_path("/nonexistent/model.json"),
            Err(ModelLoadError::Io(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, BUNDLED).unwrap();
        let model = TreeEnsembleClassifier::from_path(&path).unwrap();
        assert_eq!(model.name(), "forecast_classifier_v1");
    }
}
