use std::path::PathBuf;

use tracing::warn;

use crate::artifacts::candidate_dirs;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_WORKERS: usize = 4;
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_ARTIFACTS_DIR: &str = "JURUSAN_ARTIFACTS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: Option<PathBuf>,
    pub workers: usize,
}

/// Values given on the command line; each one beats its environment fallback.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub artifacts_dir: Option<PathBuf>,
    pub workers: Option<usize>,
}

impl ServiceConfig {
    pub fn load(overrides: ConfigOverrides) -> Self {
        Self::from_sources(overrides, |key| std::env::var(key).ok())
    }

    pub fn from_sources<F>(overrides: ConfigOverrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_non_empty = |key: &str| {
            env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = overrides
            .host
            .or_else(|| env_non_empty(ENV_HOST))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = overrides
            .port
            .unwrap_or_else(|| parse_port(env_non_empty(ENV_PORT).as_deref()));
        let artifacts_dir = overrides
            .artifacts_dir
            .or_else(|| env_non_empty(ENV_ARTIFACTS_DIR).map(PathBuf::from));
        let workers = overrides.workers.unwrap_or(DEFAULT_WORKERS).max(1);

        Self {
            host,
            port,
            artifacts_dir,
            workers,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn artifact_candidates(&self) -> Vec<PathBuf> {
        candidate_dirs(self.artifacts_dir.as_deref())
    }
}

pub fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => {
                warn!(value, default = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }
        },
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
