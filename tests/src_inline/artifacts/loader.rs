use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::features::N_FEATURES;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("jurusan_api_loader_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifacts")
}

fn copy_fixtures(dst: &Path, files: &[&str]) {
    for file in files {
        fs::copy(fixture_dir().join(file), dst.join(file)).unwrap();
    }
}

const ALL_FILES: [&str; 3] = ["scaler.json", "model.json", "label_encoder.json"];

#[test]
fn test_resolve_first_existing_candidate_wins() {
    let empty = make_temp_dir();
    let first = make_temp_dir();
    let second = make_temp_dir();
    fs::write(first.join("model.json"), "{}").unwrap();
    fs::write(second.join("model.json"), "{}").unwrap();

    let candidates = vec![empty.clone(), first.clone(), second];
    let path = resolve_artifact("model.json", &candidates).unwrap();
    assert_eq!(path, first.join("model.json"));
}

#[test]
fn test_resolve_reports_every_candidate() {
    let a = make_temp_dir();
    let b = make_temp_dir();
    let err = resolve_artifact("scaler.json", &[a.clone(), b.clone()]).unwrap_err();
    match err {
        ArtifactError::NotFound { file, tried } => {
            assert_eq!(file, "scaler.json");
            assert_eq!(tried, vec![a, b]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_directory_named_like_artifact_is_skipped() {
    let decoy = make_temp_dir();
    fs::create_dir_all(decoy.join("model.json")).unwrap();
    let real = make_temp_dir();
    fs::write(real.join("model.json"), "{}").unwrap();
    let path = resolve_artifact("model.json", &[decoy, real.clone()]).unwrap();
    assert_eq!(path, real.join("model.json"));
}

#[test]
fn test_candidate_dirs_order() {
    let configured = PathBuf::from("/tmp/configured-artifacts");
    let dirs = candidate_dirs(Some(&configured));
    assert_eq!(dirs[0], configured);
    assert_eq!(dirs[1], std::env::current_dir().unwrap());
    assert_eq!(dirs.last().unwrap(), &PathBuf::from(DEPLOYMENT_DIR));

    let without = candidate_dirs(None);
    assert_eq!(without[0], std::env::current_dir().unwrap());
    assert_eq!(without.len() + 1, dirs.len());
}

#[test]
fn test_load_fixture_pipeline() {
    let report = load_pipeline(&[fixture_dir()]);
    assert!(report.pipeline.is_ok(), "{:?}", report.pipeline.err());
    assert_eq!(report.statuses.len(), 3);
    for (status, file) in report.statuses.iter().zip(ALL_FILES) {
        assert!(status.is_loaded());
        assert_eq!(status.path.as_deref(), Some(fixture_dir().join(file).as_path()));
    }
}

#[test]
fn test_artifacts_resolved_independently() {
    let partial = make_temp_dir();
    copy_fixtures(&partial, &["scaler.json"]);
    let rest = make_temp_dir();
    copy_fixtures(&rest, &["model.json", "label_encoder.json", "scaler.json"]);

    let report = load_pipeline(&[partial.clone(), rest.clone()]);
    assert!(report.pipeline.is_ok());
    assert_eq!(report.statuses[0].path, Some(partial.join("scaler.json")));
    assert_eq!(report.statuses[1].path, Some(rest.join("model.json")));
}

#[test]
fn test_missing_artifact_degrades() {
    let dir = make_temp_dir();
    copy_fixtures(&dir, &["scaler.json", "label_encoder.json"]);
    let report = load_pipeline(&[dir]);
    let reason = report.pipeline.unwrap_err();
    assert!(reason.contains("model"));
    assert!(report.statuses[0].is_loaded());
    assert!(!report.statuses[1].is_loaded());
    assert_eq!(report.statuses[1].path, None);
    assert!(report.statuses[1].error.as_deref().unwrap().contains("model.json"));
}

#[test]
fn test_unparseable_artifact_degrades() {
    let dir = make_temp_dir();
    copy_fixtures(&dir, &ALL_FILES);
    fs::write(dir.join("label_encoder.json"), "not json").unwrap();
    let report = load_pipeline(&[dir.clone()]);
    assert!(report.pipeline.is_err());
    let status = &report.statuses[2];
    assert_eq!(status.kind, ArtifactKind::LabelDecoder);
    assert_eq!(status.path, Some(dir.join("label_encoder.json")));
    assert!(status.error.as_deref().unwrap().contains("parse error"));
}

#[test]
fn test_wrong_shape_artifact_degrades() {
    let dir = make_temp_dir();
    copy_fixtures(&dir, &ALL_FILES);
    fs::write(
        dir.join("scaler.json"),
        r#"{"kind":"standard","mean":[1.0],"scale":[1.0]}"#,
    )
    .unwrap();
    let err = read_artifact::<Scaler>(&dir.join("scaler.json")).unwrap_err();
    assert!(matches!(err, ArtifactError::Shape { .. }));
    assert!(load_pipeline(&[dir]).pipeline.is_err());
}

#[test]
fn test_inconsistent_label_encoder_degrades() {
    let dir = make_temp_dir();
    copy_fixtures(&dir, &["scaler.json", "model.json"]);
    fs::write(
        dir.join("label_encoder.json"),
        r#"{"classes":["Ekonomi","Hukum"]}"#,
    )
    .unwrap();
    let report = load_pipeline(&[dir]);
    assert!(report.statuses.iter().all(ArtifactStatus::is_loaded));
    assert!(report.pipeline.unwrap_err().contains("inconsistent"));
}

#[test]
fn test_read_artifact_typed() {
    let dec = read_artifact::<LabelDecoder>(&fixture_dir().join("label_encoder.json")).unwrap();
    assert_eq!(dec.n_classes(), 6);
    let scaler = read_artifact::<Scaler>(&fixture_dir().join("scaler.json")).unwrap();
    assert_eq!(scaler.feature_names().map(|n| n.len()), Some(N_FEATURES));
}
