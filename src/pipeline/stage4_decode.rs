use serde::{Deserialize, Serialize};

use crate::artifacts::{Artifact, ArtifactKind};
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDecoder {
    pub classes: Vec<String>,
}

impl LabelDecoder {
    pub fn decode(&self, label: i64) -> Result<&str, PipelineError> {
        usize::try_from(label)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(|s| s.as_str())
            .ok_or(PipelineError::UnknownLabel(label))
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

impl Artifact for LabelDecoder {
    const KIND: ArtifactKind = ArtifactKind::LabelDecoder;

    fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }
        for (i, name) in self.classes.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(format!("class {i} has an empty name"));
            }
            if self.classes[..i].contains(name) {
                return Err(format!("class name {name:?} appears more than once"));
            }
        }
        Ok(())
    }
}

pub fn run_stage4(decoder: &LabelDecoder, label: i64) -> Result<String, PipelineError> {
    decoder.decode(label).map(str::to_string)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_decode.rs"]
mod tests;
