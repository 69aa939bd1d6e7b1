pub mod stage1_validate;
pub mod stage2_scale;
pub mod stage3_classify;
pub mod stage4_decode;

use crate::error::{ArtifactError, PipelineError};
use crate::model::features::FeatureVector;
use stage2_scale::{Scaler, run_stage2};
use stage3_classify::{Classifier, run_stage3};
use stage4_decode::{LabelDecoder, run_stage4};

/// Anything that turns a validated feature vector into a major name.
pub trait MajorPredictor: Send + Sync {
    fn predict_major(&self, features: &FeatureVector) -> Result<String, PipelineError>;

    /// Every major name this predictor can return.
    fn labels(&self) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    scaler: Scaler,
    classifier: Classifier,
    decoder: LabelDecoder,
}

impl Pipeline {
    pub fn new(
        scaler: Scaler,
        classifier: Classifier,
        decoder: LabelDecoder,
    ) -> Result<Self, ArtifactError> {
        let undecodable: Vec<i64> = classifier
            .classes()
            .iter()
            .copied()
            .filter(|&c| decoder.decode(c).is_err())
            .collect();
        if !undecodable.is_empty() {
            return Err(ArtifactError::Inconsistent(format!(
                "classifier classes {:?} are outside the label encoder range 0..{}",
                undecodable,
                decoder.n_classes()
            )));
        }
        Ok(Self {
            scaler,
            classifier,
            decoder,
        })
    }

    pub fn run(&self, features: &FeatureVector) -> Result<String, PipelineError> {
        let scaled = run_stage2(&self.scaler, features)?;
        let encoded = run_stage3(&self.classifier, &scaled)?;
        run_stage4(&self.decoder, encoded)
    }
}

impl MajorPredictor for Pipeline {
    fn predict_major(&self, features: &FeatureVector) -> Result<String, PipelineError> {
        self.run(features)
    }

    fn labels(&self) -> Vec<String> {
        self.classifier
            .classes()
            .iter()
            .filter_map(|&c| self.decoder.decode(c).ok())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
