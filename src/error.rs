use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{file} not found (tried: {})", join_paths(.tried))]
    NotFound { file: String, tried: Vec<PathBuf> },
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact {}: {msg}", .path.display())]
    Shape { path: PathBuf, msg: String },
    #[error("inconsistent pipeline: {0}")]
    Inconsistent(String),
}

impl ArtifactError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn shape(path: &Path, msg: impl Into<String>) -> Self {
        ArtifactError::Shape {
            path: path.to_path_buf(),
            msg: msg.into(),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("{stage}: expected {expected} values, got {got}")]
    Dimension {
        stage: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{stage}: non-finite value at position {index}")]
    NonFinite { stage: &'static str, index: usize },
    #[error("classify: {0}")]
    Classify(String),
    #[error("decode: label {0} is not known to the label encoder")]
    UnknownLabel(i64),
}

/// Failures surfaced to `/predict` callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    #[error("Model belum siap: {0}")]
    Unavailable(String),
    #[error("Request tidak valid: {0}")]
    Malformed(String),
    #[error("Input tidak lengkap, fitur yang hilang: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),
    #[error("Nilai untuk '{feature}' harus berupa angka, diterima: {value}")]
    InvalidValue { feature: String, value: String },
    #[error("Terjadi kesalahan internal: {0}")]
    Internal(String),
}

impl PredictError {
    pub fn status_code(&self) -> u16 {
        match self {
            PredictError::Unavailable(_) => 503,
            PredictError::Malformed(_)
            | PredictError::MissingFeatures(_)
            | PredictError::InvalidValue { .. } => 400,
            PredictError::Internal(_) => 500,
        }
    }

    pub fn missing_features(&self) -> Option<&[String]> {
        match self {
            PredictError::MissingFeatures(names) => Some(names),
            _ => None,
        }
    }
}

/// Client-facing text for any failure inside the pipeline; details go to the log.
pub const INTERNAL_MESSAGE: &str = "permintaan gagal diproses";

impl From<PipelineError> for PredictError {
    fn from(_: PipelineError) -> Self {
        PredictError::Internal(INTERNAL_MESSAGE.to_string())
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/error.rs"]
mod tests;
