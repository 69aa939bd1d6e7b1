pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::artifacts::{ArtifactStatus, LoadReport};
use crate::error::PredictError;
use crate::model::features::FeatureVector;
use crate::model::majors::{describe, missing_descriptions};
use crate::pipeline::MajorPredictor;
use crate::pipeline::stage1_validate::run_stage1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub jurusan: String,
    pub deskripsi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactHealth {
    pub name: &'static str,
    pub loaded: bool,
    pub path: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub model_loaded: bool,
    pub artifacts: Vec<ArtifactHealth>,
    pub labels_without_description: Vec<String>,
}

impl HealthReport {
    pub fn status_code(&self) -> u16 {
        if self.model_loaded { 200 } else { 503 }
    }
}

/// Holds the pipeline, or the reason it could not be loaded.
pub struct InferenceService {
    predictor: Result<Arc<dyn MajorPredictor>, String>,
    artifacts: Vec<ArtifactStatus>,
    labels_without_description: Vec<String>,
}

impl InferenceService {
    pub fn ready(predictor: Arc<dyn MajorPredictor>, artifacts: Vec<ArtifactStatus>) -> Self {
        let labels = predictor.labels();
        let labels_without_description = missing_descriptions(labels.iter().map(String::as_str));
        if !labels_without_description.is_empty() {
            warn!(
                labels = ?labels_without_description,
                "decoded labels have no description, generic text will be used"
            );
        }
        info!(labels = labels.len(), "pipeline ready");
        Self {
            predictor: Ok(predictor),
            artifacts,
            labels_without_description,
        }
    }

    pub fn degraded(reason: impl Into<String>, artifacts: Vec<ArtifactStatus>) -> Self {
        let reason = reason.into();
        error!(reason = %reason, "pipeline unavailable, starting in degraded mode");
        Self {
            predictor: Err(reason),
            artifacts,
            labels_without_description: Vec::new(),
        }
    }

    pub fn from_load(report: LoadReport) -> Self {
        match report.pipeline {
            Ok(pipeline) => Self::ready(Arc::new(pipeline), report.statuses),
            Err(reason) => Self::degraded(reason, report.statuses),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.predictor.is_ok()
    }

    pub fn labels_without_description(&self) -> &[String] {
        &self.labels_without_description
    }

    pub fn predict(&self, body: &[u8]) -> Result<Prediction, PredictError> {
        self.predict_body(Ok(body))
    }

    /// Readiness is checked before the body, or its read error, is looked at.
    pub fn predict_body(
        &self,
        body: Result<&[u8], PredictError>,
    ) -> Result<Prediction, PredictError> {
        let predictor = self
            .predictor
            .as_ref()
            .map_err(|reason| PredictError::Unavailable(reason.clone()))?;
        let features = run_stage1(body?)?;
        self.predict_features(&**predictor, &features)
    }

    fn predict_features(
        &self,
        predictor: &dyn MajorPredictor,
        features: &FeatureVector,
    ) -> Result<Prediction, PredictError> {
        let major = predictor.predict_major(features).map_err(|err| {
            error!(error = %err, "pipeline failed");
            PredictError::from(err)
        })?;
        let deskripsi = describe(&major).into_owned();
        info!(jurusan = %major, "prediction complete");
        Ok(Prediction {
            jurusan: major,
            deskripsi,
        })
    }

    pub fn health(&self) -> HealthReport {
        let model_loaded = self.is_ready();
        HealthReport {
            status: if model_loaded { "healthy" } else { "degraded" },
            model_loaded,
            artifacts: self.artifacts.iter().map(artifact_health).collect(),
            labels_without_description: self.labels_without_description().to_vec(),
        }
    }
}

fn artifact_health(status: &ArtifactStatus) -> ArtifactHealth {
    ArtifactHealth {
        name: status.kind.name(),
        loaded: status.is_loaded(),
        path: status.path.as_ref().map(|p: &PathBuf| p.display().to_string()),
        error: status.error.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/service/tests.rs"]
mod tests;
