mod artifacts;
mod config;
mod error;
mod model;
mod pipeline;
mod server;
mod service;
mod tracing;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::artifacts::load_pipeline;
use crate::config::{ConfigOverrides, ServiceConfig};
use crate::service::InferenceService;
use crate::service::routes::handle;

#[derive(Debug, Parser)]
#[command(
    name = "jurusan-api",
    version,
    about = "Academic major recommendation service backed by a pre-trained classifier."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve(ServeArgs),
    /// Run one request body from a JSON file and print the response.
    Predict(PredictArgs),
    /// Load the artifacts and print the readiness report.
    Check(ArtifactArgs),
}

#[derive(Debug, Default, Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    workers: Option<usize>,
    #[command(flatten)]
    artifacts: ArtifactArgs,
}

#[derive(Debug, Args)]
struct PredictArgs {
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    artifacts: ArtifactArgs,
}

#[derive(Debug, Default, Args)]
struct ArtifactArgs {
    /// Directory searched first for scaler.json, model.json and label_encoder.json.
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,
}

fn main() {
    crate::tracing::init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            let config = ServiceConfig::load(ConfigOverrides {
                host: args.host,
                port: args.port,
                artifacts_dir: args.artifacts.artifacts_dir,
                workers: args.workers,
            });
            let service = Arc::new(build_service(&config));
            server::serve(&config, service).map_err(|e| e.to_string())
        }
        Command::Predict(args) => {
            let config = artifact_config(args.artifacts);
            let service = build_service(&config);
            let body = read_input(&args.input)?;
            let response = handle(&service, "POST", "/predict", &body);
            println!("{}", String::from_utf8_lossy(&response.body));
            if response.status >= 400 {
                return Err(format!("prediction failed with status {}", response.status));
            }
            Ok(())
        }
        Command::Check(args) => {
            let config = artifact_config(args);
            let service = build_service(&config);
            let report = service.health();
            let rendered = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
            println!("{rendered}");
            if !report.model_loaded {
                return Err("pipeline is degraded".to_string());
            }
            Ok(())
        }
    }
}

fn artifact_config(args: ArtifactArgs) -> ServiceConfig {
    ServiceConfig::load(ConfigOverrides {
        artifacts_dir: args.artifacts_dir,
        ..ConfigOverrides::default()
    })
}

fn build_service(config: &ServiceConfig) -> InferenceService {
    let candidates = config.artifact_candidates();
    ::tracing::info!(candidates = ?candidates, "loading pipeline artifacts");
    InferenceService::from_load(load_pipeline(&candidates))
}

fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
