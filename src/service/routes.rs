use serde::Serialize;
use tracing::{error, info};

use crate::error::PredictError;
use crate::service::{InferenceService, Prediction};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const ALLOW_HEADERS: &str = "Content-Type";

/// Fallback body if serialization itself fails.
const SERIALIZE_FAILED_BODY: &[u8] =
    br#"{"error":"Terjadi kesalahan internal","jurusan":null,"deskripsi":null,"status":"error"}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Health,
    Predict,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Root),
            "/health" => Some(Route::Health),
            "/predict" => Some(Route::Predict),
            _ => None,
        }
    }

    pub fn allowed_methods(self) -> &'static str {
        match self {
            Route::Root | Route::Health => "GET, OPTIONS",
            Route::Predict => "POST, OPTIONS",
        }
    }

    fn accepts(self, method: &str) -> bool {
        matches!(
            (self, method),
            (Route::Root, "GET") | (Route::Health, "GET") | (Route::Predict, "POST")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub allow: Option<&'static str>,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_vec(payload) {
            Ok(body) => Self {
                status,
                body,
                allow: None,
            },
            Err(err) => {
                error!(error = %err, "failed to serialize response");
                Self::internal_error()
            }
        }
    }

    pub fn error(err: &PredictError) -> Self {
        Self::json(err.status_code(), &ErrorBody::from_error(err))
    }

    pub fn internal_error() -> Self {
        Self {
            status: 500,
            body: SERIALIZE_FAILED_BODY.to_vec(),
            allow: None,
        }
    }

    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = vec![("Access-Control-Allow-Origin", "*")];
        if !self.body.is_empty() {
            headers.push(("Content-Type", JSON_CONTENT_TYPE));
        }
        if let Some(allow) = self.allow {
            headers.push(("Allow", allow));
            headers.push(("Access-Control-Allow-Methods", allow));
            headers.push(("Access-Control-Allow-Headers", ALLOW_HEADERS));
        }
        headers
    }
}

#[derive(Debug, Serialize)]
struct SuccessBody<'a> {
    jurusan: &'a str,
    deskripsi: &'a str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub jurusan: Option<String>,
    pub deskripsi: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_features: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn from_error(err: &PredictError) -> Self {
        Self::message(err.to_string(), err.missing_features().map(<[String]>::to_vec))
    }

    fn message(error: String, missing_features: Option<Vec<String>>) -> Self {
        Self {
            error,
            jurusan: None,
            deskripsi: None,
            status: "error",
            missing_features,
        }
    }
}

#[derive(Debug, Serialize)]
struct EndpointInfo {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct InfoBody {
    message: &'static str,
    model_loaded: bool,
    endpoints: Vec<EndpointInfo>,
}

fn info_body(service: &InferenceService) -> InfoBody {
    InfoBody {
        message: "API Rekomendasi Jurusan berjalan",
        model_loaded: service.is_ready(),
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/",
                description: "Informasi layanan",
            },
            EndpointInfo {
                method: "GET",
                path: "/health",
                description: "Status kesiapan model",
            },
            EndpointInfo {
                method: "POST",
                path: "/predict",
                description: "Rekomendasi jurusan dari 13 nilai mata pelajaran",
            },
        ],
    }
}

pub fn predict_response(result: &Result<Prediction, PredictError>) -> ApiResponse {
    match result {
        Ok(p) => ApiResponse::json(
            200,
            &SuccessBody {
                jurusan: &p.jurusan,
                deskripsi: &p.deskripsi,
                status: "success",
            },
        ),
        Err(err) => ApiResponse::error(err),
    }
}

/// Transport-independent dispatch of one request.
pub fn handle(service: &InferenceService, method: &str, path: &str, body: &[u8]) -> ApiResponse {
    dispatch(service, method, path, Ok(body))
}

/// Like [`handle`], for transports whose body read can fail. A read error is
/// only reported once the route, method and readiness checks have passed.
pub fn dispatch(
    service: &InferenceService,
    method: &str,
    path: &str,
    body: Result<&[u8], PredictError>,
) -> ApiResponse {
    info!(method, path, "request received");
    let Some(route) = Route::from_path(path) else {
        return ApiResponse::json(
            404,
            &ErrorBody::message(format!("Endpoint {path} tidak ditemukan"), None),
        );
    };

    if method == "OPTIONS" {
        return ApiResponse {
            status: 204,
            body: Vec::new(),
            allow: Some(route.allowed_methods()),
        };
    }

    if !route.accepts(method) {
        let mut response = ApiResponse::json(
            405,
            &ErrorBody::message(format!("Metode {method} tidak diizinkan untuk {path}"), None),
        );
        response.allow = Some(route.allowed_methods());
        return response;
    }

    match route {
        Route::Root => ApiResponse::json(200, &info_body(service)),
        Route::Health => {
            let report = service.health();
            ApiResponse::json(report.status_code(), &report)
        }
        Route::Predict => predict_response(&service.predict_body(body)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/service/routes.rs"]
mod tests;
