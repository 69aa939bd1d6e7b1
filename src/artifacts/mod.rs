//! Fitted pipeline artifacts and where to find them on disk.
//!
//! Each artifact is a JSON document written by the offline training job.
//! They are located once at startup by walking an ordered list of candidate
//! directories; the first directory containing the file wins.

pub mod loader;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub use loader::{LoadReport, candidate_dirs, load_pipeline};

/// Hard-coded deployment location, tried last.
pub const DEPLOYMENT_DIR: &str = "/opt/jurusan-api/artifacts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scaler,
    Classifier,
    LabelDecoder,
}

impl ArtifactKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Scaler => "scaler.json",
            ArtifactKind::Classifier => "model.json",
            ArtifactKind::LabelDecoder => "label_encoder.json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Classifier => "model",
            ArtifactKind::LabelDecoder => "label_encoder",
        }
    }
}

/// A deserializable pipeline stage with structural checks run at load time.
pub trait Artifact: DeserializeOwned {
    const KIND: ArtifactKind;

    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactStatus {
    pub kind: ArtifactKind,
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

impl ArtifactStatus {
    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}
