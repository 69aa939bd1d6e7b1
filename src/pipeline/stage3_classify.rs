use serde::{Deserialize, Serialize};

use crate::artifacts::{Artifact, ArtifactKind};
use crate::error::PipelineError;
use crate::model::features::N_FEATURES;

const LEAF: i64 = -1;

/// Fitted tree stored as parallel per-node arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl Tree {
    fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_classes: usize) -> Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("tree node arrays differ in length".to_string());
        }
        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                if self.value[node].len() != n_classes {
                    return Err(format!(
                        "leaf {node} has {} class weights, expected {n_classes}",
                        self.value[node].len()
                    ));
                }
                continue;
            }
            for child in [left, right] {
                // Children are stored after their parent, which also rules out cycles.
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} has invalid child index {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= N_FEATURES as i64 {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }
        Ok(())
    }

    pub fn leaf_distribution(&self, x: &[f64]) -> Result<&[f64], PipelineError> {
        let mut node = 0usize;
        for _ in 0..self.n_nodes() {
            let left = self.children_left.get(node).copied().unwrap_or(LEAF);
            if left == LEAF {
                return self
                    .value
                    .get(node)
                    .map(|v| v.as_slice())
                    .ok_or_else(|| PipelineError::Classify(format!("missing leaf value {node}")));
            }
            let feature = self.feature[node] as usize;
            let value = x.get(feature).copied().ok_or_else(|| {
                PipelineError::Classify(format!("feature {feature} out of range"))
            })?;
            node = if value <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Err(PipelineError::Classify(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    /// One-vs-rest linear model; a single coefficient row means binary.
    Linear {
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    DecisionTree {
        classes: Vec<i64>,
        tree: Tree,
    },
    RandomForest {
        classes: Vec<i64>,
        trees: Vec<Tree>,
    },
}

impl Classifier {
    pub fn classes(&self) -> &[i64] {
        match self {
            Classifier::Linear { classes, .. }
            | Classifier::DecisionTree { classes, .. }
            | Classifier::RandomForest { classes, .. } => classes,
        }
    }

    pub fn predict(&self, x: &[f64]) -> Result<i64, PipelineError> {
        if x.len() != N_FEATURES {
            return Err(PipelineError::Dimension {
                stage: "classify",
                expected: N_FEATURES,
                got: x.len(),
            });
        }
        let idx = match self {
            Classifier::Linear {
                classes,
                coef,
                intercept,
            } => {
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept.iter())
                    .map(|(row, b)| dot(row, x) + b)
                    .collect();
                if classes.len() == 2 && scores.len() == 1 {
                    if scores[0] > 0.0 { 1 } else { 0 }
                } else {
                    argmax(&scores)
                }
            }
            Classifier::DecisionTree { tree, .. } => argmax(tree.leaf_distribution(x)?),
            Classifier::RandomForest { classes, trees } => {
                let mut proba = vec![0.0f64; classes.len()];
                for tree in trees {
                    let dist = tree.leaf_distribution(x)?;
                    let total: f64 = dist.iter().sum();
                    if total <= 0.0 {
                        continue;
                    }
                    for (p, w) in proba.iter_mut().zip(dist.iter()) {
                        *p += w / total;
                    }
                }
                argmax(&proba)
            }
        };
        self.classes().get(idx).copied().ok_or_else(|| {
            PipelineError::Classify(format!("predicted index {idx} has no class"))
        })
    }
}

impl Artifact for Classifier {
    const KIND: ArtifactKind = ArtifactKind::Classifier;

    fn validate(&self) -> Result<(), String> {
        let classes = self.classes();
        if classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        match self {
            Classifier::Linear {
                coef, intercept, ..
            } => {
                if classes.len() < 2 {
                    return Err(format!(
                        "linear model needs at least 2 classes, got {}",
                        classes.len()
                    ));
                }
                let expected_rows = if classes.len() == 2 && coef.len() == 1 {
                    1
                } else {
                    classes.len()
                };
                if coef.len() != expected_rows {
                    return Err(format!(
                        "coef has {} rows for {} classes",
                        coef.len(),
                        classes.len()
                    ));
                }
                if intercept.len() != coef.len() {
                    return Err(format!(
                        "intercept has {} entries, expected {}",
                        intercept.len(),
                        coef.len()
                    ));
                }
                if let Some(row) = coef.iter().find(|r| r.len() != N_FEATURES) {
                    return Err(format!(
                        "coef row has {} entries, expected {N_FEATURES}",
                        row.len()
                    ));
                }
                if coef.iter().flatten().chain(intercept.iter()).any(|v| !v.is_finite()) {
                    return Err("linear parameters must be finite".to_string());
                }
                Ok(())
            }
            Classifier::DecisionTree { tree, .. } => tree.validate(classes.len()),
            Classifier::RandomForest { trees, .. } => {
                if trees.is_empty() {
                    return Err("random forest has no trees".to_string());
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(classes.len())
                        .map_err(|e| format!("tree {i}: {e}"))?;
                }
                Ok(())
            }
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// First maximum wins on ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

pub fn run_stage3(classifier: &Classifier, scaled: &[f64]) -> Result<i64, PipelineError> {
    classifier.predict(scaled)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_classify.rs"]
mod tests;
