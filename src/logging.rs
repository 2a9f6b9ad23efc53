// SPDX-License-Identifier: MIT OR Apache-2.0

//! File logging for applications.
//!
//! The library only emits `tracing` events. Binaries that want them on disk call
//! [`init_file_logging`] once at startup.

use crate::domain::{FeatureGateError, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Returns `{project_root}/logs/development.log`.
pub fn log_file_path(project_root: impl AsRef<Path>) -> PathBuf {
    project_root.as_ref().join("logs").join("development.log")
}

/// Installs a global JSON subscriber appending to the development log file.
///
/// The `logs` directory is created if needed. The filter comes from `RUST_LOG`
/// and falls back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns an `IoError` if the log file cannot be opened, or a `ConfigError`
/// if a global subscriber is already installed.
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> feature_gate::domain::Result<()> {
/// let path = feature_gate::logging::init_file_logging(".")?;
/// println!("logging to {}", path.display());
/// # Ok(())
/// # }
/// ```
pub fn init_file_logging(project_root: impl AsRef<Path>) -> Result<PathBuf> {
    let path = log_file_path(project_root);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| FeatureGateError::ConfigError {
            message: format!("Failed to install log subscriber: {}", e),
            source: Some(e),
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        assert_eq!(
            log_file_path("/srv/app"),
            PathBuf::from("/srv/app/logs/development.log")
        );
    }

    #[test]
    fn test_init_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("project");

        // Another test may already own the global subscriber.
        match init_file_logging(&root) {
            Ok(path) => assert!(path.exists()),
            Err(FeatureGateError::ConfigError { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
        assert!(root.join("logs").is_dir());
    }
}
