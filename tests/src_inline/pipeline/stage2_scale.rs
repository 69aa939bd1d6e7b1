use super::*;

fn standard(mean: f64, scale: f64) -> Scaler {
    Scaler::Standard {
        mean: vec![mean; N_FEATURES],
        scale: vec![scale; N_FEATURES],
        feature_names: None,
    }
}

#[test]
fn test_standard_transform() {
    let scaler = standard(70.0, 10.0);
    let mut raw = [70.0; N_FEATURES];
    raw[0] = 90.0;
    raw[1] = 65.0;
    let out = run_stage2(&scaler, &FeatureVector::new(raw)).unwrap();
    assert_eq!(out[0], 2.0);
    assert_eq!(out[1], -0.5);
    assert_eq!(out[2], 0.0);
}

#[test]
fn test_zero_scale_treated_as_one() {
    let scaler = standard(50.0, 0.0);
    let out = scaler.transform(&[60.0; N_FEATURES]).unwrap();
    assert!(out.iter().all(|&v| v == 10.0));
}

#[test]
fn test_min_max_transform() {
    let scaler = Scaler::MinMax {
        min: vec![-0.5; N_FEATURES],
        scale: vec![0.01; N_FEATURES],
        feature_names: None,
    };
    let out = scaler.transform(&[100.0; N_FEATURES]).unwrap();
    assert!((out[0] - 0.5).abs() < 1e-12);
}

#[test]
fn test_dimension_mismatch() {
    let err = standard(0.0, 1.0).transform(&[1.0, 2.0]).unwrap_err();
    assert_eq!(
        err,
        PipelineError::Dimension {
            stage: "scale",
            expected: N_FEATURES,
            got: 2
        }
    );
}

#[test]
fn test_overflow_is_non_finite() {
    let scaler = standard(0.0, 1e-308);
    let err = scaler.transform(&[1e308; N_FEATURES]).unwrap_err();
    assert_eq!(
        err,
        PipelineError::NonFinite {
            stage: "scale",
            index: 0
        }
    );
}

#[test]
fn test_validate_lengths_and_names() {
    assert!(standard(0.0, 1.0).validate().is_ok());

    let short = Scaler::Standard {
        mean: vec![0.0; 3],
        scale: vec![1.0; N_FEATURES],
        feature_names: None,
    };
    assert!(short.validate().unwrap_err().contains("mean"));

    let mut names: Vec<String> = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
    let ok = Scaler::Standard {
        mean: vec![0.0; N_FEATURES],
        scale: vec![1.0; N_FEATURES],
        feature_names: Some(names.clone()),
    };
    assert!(ok.validate().is_ok());

    names.swap(0, 1);
    let swapped = Scaler::Standard {
        mean: vec![0.0; N_FEATURES],
        scale: vec![1.0; N_FEATURES],
        feature_names: Some(names),
    };
    assert!(swapped.validate().unwrap_err().contains("column order"));
}

#[test]
fn test_deserialize_tagged_json() {
    let json = format!(
        r#"{{"kind":"min_max","min":{min:?},"scale":{scale:?}}}"#,
        min = vec![0.0; N_FEATURES],
        scale = vec![0.01; N_FEATURES]
    );
    let scaler: Scaler = serde_json::from_str(&json).unwrap();
    assert!(matches!(scaler, Scaler::MinMax { .. }));
    assert!(scaler.feature_names().is_none());

    let unknown = r#"{"kind":"robust","center":[],"scale":[]}"#;
    assert!(serde_json::from_str::<Scaler>(unknown).is_err());
}
