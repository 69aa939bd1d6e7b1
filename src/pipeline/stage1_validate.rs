use serde_json::{Map, Value};
use tracing::warn;

use crate::error::PredictError;
use crate::model::features::{FEATURE_COLUMNS, FeatureVector, N_FEATURES};

pub fn run_stage1(body: &[u8]) -> Result<FeatureVector, PredictError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(PredictError::Malformed(
            "body JSON wajib diisi".to_string(),
        ));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictError::Malformed(format!("JSON tidak dapat dibaca: {e}")))?;
    match value {
        Value::Object(map) => validate_object(&map),
        _ => Err(PredictError::Malformed(
            "body harus berupa objek JSON".to_string(),
        )),
    }
}

/// Missing keys are reported together; coercion stops at the first bad value.
pub fn validate_object(map: &Map<String, Value>) -> Result<FeatureVector, PredictError> {
    let missing: Vec<String> = FEATURE_COLUMNS
        .iter()
        .filter(|name| !map.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        warn!(missing = ?missing, "request is missing features");
        return Err(PredictError::MissingFeatures(missing));
    }

    let mut values = [0.0f64; N_FEATURES];
    for (slot, name) in values.iter_mut().zip(FEATURE_COLUMNS.iter()) {
        let raw = &map[*name];
        match coerce_value(raw) {
            Some(v) => *slot = v,
            None => {
                warn!(feature = *name, value = %raw, "feature value is not numeric");
                return Err(PredictError::InvalidValue {
                    feature: name.to_string(),
                    value: raw.to_string(),
                });
            }
        }
    }
    Ok(FeatureVector::new(values))
}

/// Numbers pass through, numeric strings are parsed; anything non-finite is rejected.
pub fn coerce_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
