use serde::{Deserialize, Serialize};

use crate::artifacts::{Artifact, ArtifactKind};
use crate::error::PipelineError;
use crate::model::features::{FEATURE_COLUMNS, FeatureVector, N_FEATURES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
    /// `x * scale + min`
    MinMax {
        min: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature_names: Option<Vec<String>>,
    },
}

impl Scaler {
    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            Scaler::Standard { feature_names, .. } | Scaler::MinMax { feature_names, .. } => {
                feature_names.as_deref()
            }
        }
    }

    pub fn transform(&self, input: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if input.len() != N_FEATURES {
            return Err(PipelineError::Dimension {
                stage: "scale",
                expected: N_FEATURES,
                got: input.len(),
            });
        }
        let mut out = Vec::with_capacity(input.len());
        match self {
            Scaler::Standard { mean, scale, .. } => {
                for (i, &x) in input.iter().enumerate() {
                    let s = if scale[i] == 0.0 { 1.0 } else { scale[i] };
                    out.push((x - mean[i]) / s);
                }
            }
            Scaler::MinMax { min, scale, .. } => {
                for (i, &x) in input.iter().enumerate() {
                    out.push(x * scale[i] + min[i]);
                }
            }
        }
        if let Some(index) = out.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::NonFinite {
                stage: "scale",
                index,
            });
        }
        Ok(out)
    }
}

impl Artifact for Scaler {
    const KIND: ArtifactKind = ArtifactKind::Scaler;

    fn validate(&self) -> Result<(), String> {
        let (a_name, a, b) = match self {
            Scaler::Standard { mean, scale, .. } => ("mean", mean, scale),
            Scaler::MinMax { min, scale, .. } => ("min", min, scale),
        };
        if a.len() != N_FEATURES {
            return Err(format!("{a_name} has {} entries, expected {N_FEATURES}", a.len()));
        }
        if b.len() != N_FEATURES {
            return Err(format!("scale has {} entries, expected {N_FEATURES}", b.len()));
        }
        if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".to_string());
        }
        if let Some(names) = self.feature_names() {
            let matches = names.len() == N_FEATURES
                && names.iter().zip(FEATURE_COLUMNS.iter()).all(|(n, c)| n == c);
            if !matches {
                return Err(format!(
                    "feature_names {:?} do not match the expected column order {:?}",
                    names, FEATURE_COLUMNS
                ));
            }
        }
        Ok(())
    }
}

pub fn run_stage2(scaler: &Scaler, features: &FeatureVector) -> Result<Vec<f64>, PipelineError> {
    scaler.transform(features.as_slice())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_scale.rs"]
mod tests;
