use std::path::PathBuf;

use thiserror::Error;

/// Failures of the detect / dispatch / locate / position pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("monitor detection failed: {0}")]
    DetectionFailed(String),
    #[error("failed to launch: {0}")]
    DispatchFailed(String),
    #[error("window '{title}' not found after {attempts} attempts")]
    NotFound { title: String, attempts: u32 },
    #[error("failed to position: {0}")]
    PositionFailed(String),
    #[error("picker failed: {0}")]
    PickerFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("could not determine home directory")]
    NoHome,
}
