use super::*;

#[test]
fn test_no_subcommand_defaults_to_serve() {
    let cli = Cli::try_parse_from(["jurusan-api"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_serve_flags() {
    let cli = Cli::try_parse_from([
        "jurusan-api",
        "serve",
        "--port",
        "8080",
        "--host",
        "127.0.0.1",
        "--workers",
        "2",
        "--artifacts-dir",
        "/srv/models",
    ])
    .unwrap();
    match cli.command {
        Some(Command::Serve(args)) => {
            assert_eq!(args.port, Some(8080));
            assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            assert_eq!(args.workers, Some(2));
            assert_eq!(
                args.artifacts.artifacts_dir,
                Some(PathBuf::from("/srv/models"))
            );
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_predict_requires_input() {
    assert!(Cli::try_parse_from(["jurusan-api", "predict"]).is_err());
    let cli = Cli::try_parse_from(["jurusan-api", "predict", "--input", "req.json"]).unwrap();
    match cli.command {
        Some(Command::Predict(args)) => assert_eq!(args.input, PathBuf::from("req.json")),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_invalid_port_rejected() {
    assert!(Cli::try_parse_from(["jurusan-api", "serve", "--port", "http"]).is_err());
}

#[test]
fn test_check_and_predict_with_fixtures() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifacts");
    let check = Cli {
        command: Some(Command::Check(ArtifactArgs {
            artifacts_dir: Some(dir.clone()),
        })),
    };
    assert!(run(check).is_ok());

    let input = std::env::temp_dir().join(format!("jurusan_api_main_{}.json", std::process::id()));
    std::fs::write(&input, br#"{"Matematika": 90}"#).unwrap();
    let predict = Cli {
        command: Some(Command::Predict(PredictArgs {
            input: input.clone(),
            artifacts: ArtifactArgs {
                artifacts_dir: Some(dir),
            },
        })),
    };
    let err = run(predict).unwrap_err();
    assert!(err.contains("400"));
}
