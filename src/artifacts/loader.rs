use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::artifacts::{Artifact, ArtifactKind, ArtifactStatus, DEPLOYMENT_DIR};
use crate::error::ArtifactError;
use crate::pipeline::Pipeline;
use crate::pipeline::stage2_scale::Scaler;
use crate::pipeline::stage3_classify::Classifier;
use crate::pipeline::stage4_decode::LabelDecoder;

#[derive(Debug)]
pub struct LoadReport {
    pub statuses: Vec<ArtifactStatus>,
    pub pipeline: Result<Pipeline, String>,
}

/// Configured dir, working dir, executable dir, then the deployment path.
pub fn candidate_dirs(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(4);
    if let Some(dir) = configured {
        dirs.push(dir.to_path_buf());
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    dirs.push(PathBuf::from(DEPLOYMENT_DIR));

    let mut unique: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !unique.contains(&dir) {
            unique.push(dir);
        }
    }
    unique
}

pub fn resolve_artifact(file_name: &str, candidates: &[PathBuf]) -> Result<PathBuf, ArtifactError> {
    candidates
        .iter()
        .map(|dir| dir.join(file_name))
        .find(|path| path.is_file())
        .ok_or_else(|| ArtifactError::NotFound {
            file: file_name.to_string(),
            tried: candidates.to_vec(),
        })
}

pub fn read_artifact<T: Artifact>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    let artifact: T = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    artifact
        .validate()
        .map_err(|msg| ArtifactError::shape(path, msg))?;
    Ok(artifact)
}

pub fn load_artifact<T: Artifact>(candidates: &[PathBuf]) -> (Option<T>, ArtifactStatus) {
    let kind = T::KIND;
    let path = match resolve_artifact(kind.file_name(), candidates) {
        Ok(path) => path,
        Err(err) => {
            error!(artifact = kind.name(), error = %err, "artifact not found");
            return (None, failed(kind, None, &err));
        }
    };
    match read_artifact::<T>(&path) {
        Ok(artifact) => {
            info!(artifact = kind.name(), path = %path.display(), "artifact loaded");
            let status = ArtifactStatus {
                kind,
                path: Some(path),
                error: None,
            };
            (Some(artifact), status)
        }
        Err(err) => {
            error!(artifact = kind.name(), error = %err, "artifact failed to load");
            (None, failed(kind, Some(path), &err))
        }
    }
}

fn failed(kind: ArtifactKind, path: Option<PathBuf>, err: &ArtifactError) -> ArtifactStatus {
    ArtifactStatus {
        kind,
        path,
        error: Some(err.to_string()),
    }
}

/// Loads all three artifacts; any failure leaves the pipeline unavailable.
pub fn load_pipeline(candidates: &[PathBuf]) -> LoadReport {
    let (scaler, scaler_status) = load_artifact::<Scaler>(candidates);
    let (classifier, classifier_status) = load_artifact::<Classifier>(candidates);
    let (decoder, decoder_status) = load_artifact::<LabelDecoder>(candidates);
    let statuses = vec![scaler_status, classifier_status, decoder_status];

    let pipeline = match (scaler, classifier, decoder) {
        (Some(scaler), Some(classifier), Some(decoder)) => {
            Pipeline::new(scaler, classifier, decoder).map_err(|err| {
                error!(error = %err, "pipeline artifacts are inconsistent");
                err.to_string()
            })
        }
        _ => {
            let failed: Vec<&str> = statuses
                .iter()
                .filter(|s| !s.is_loaded())
                .map(|s| s.kind.name())
                .collect();
            Err(format!("artifact gagal dimuat: {}", failed.join(", ")))
        }
    };

    LoadReport { statuses, pipeline }
}

#[cfg(test)]
#[path = "../../tests/src_inline/artifacts/loader.rs"]
mod tests;
