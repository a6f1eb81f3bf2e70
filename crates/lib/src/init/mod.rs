//! Scaffold a new project configuration.
//!
//! This module provides the core logic for the `weave init` command, which
//! writes a starter `weave.toml` into a project directory.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::consts::CONFIG_FILE_NAME;

pub use templates::STARTER_CONFIG;

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {} (use --force to overwrite)", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },
}

/// Write the starter configuration into `dir`, creating it if needed.
///
/// Refuses to replace an existing `weave.toml` unless `force` is set.
/// Returns the path of the written file.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf, InitError> {
  fs::create_dir_all(dir).map_err(|source| InitError::CreateDir {
    path: dir.to_path_buf(),
    source,
  })?;

  let path = dir.join(CONFIG_FILE_NAME);
  if path.exists() {
    if !force {
      return Err(InitError::PathExists { path });
    }
    warn!(path = %path.display(), "overwriting existing config");
  }

  fs::write(&path, STARTER_CONFIG).map_err(|source| InitError::WriteFile {
    path: path.clone(),
    source,
  })?;

  info!(path = %path.display(), "wrote starter config");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ProjectConfig;
  use crate::suite::SuiteRegistry;
  use crate::util::testutil::RecordingPipeline;
  use tempfile::TempDir;

  #[test]
  fn writes_config_into_new_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("project");

    let path = init_config(&dir, false).unwrap();

    assert_eq!(path, dir.join(CONFIG_FILE_NAME));
    assert_eq!(fs::read_to_string(&path).unwrap(), STARTER_CONFIG);
  }

  #[test]
  fn refuses_to_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "# mine").unwrap();

    let err = init_config(temp.path(), false).unwrap_err();

    assert!(matches!(err, InitError::PathExists { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");
  }

  #[test]
  fn force_overwrites() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE_NAME), "# mine").unwrap();

    let path = init_config(temp.path(), true).unwrap();

    assert_eq!(fs::read_to_string(path).unwrap(), STARTER_CONFIG);
  }

  #[test]
  fn starter_config_composes() {
    let config = ProjectConfig::parse(STARTER_CONFIG).unwrap();
    let suites = SuiteRegistry::with_builtins(RecordingPipeline::shared());
    let groups = config.source_groups(&suites).unwrap();
    let mut composer = crate::compose::Composer::new(groups, suites);

    let report = composer.generate().unwrap();

    assert_eq!(report.sources.len(), 9);
    assert_eq!(composer.actions().len(), 27);
    assert!(report.overwritten.is_empty());
    for name in ["compileClientSass", "bundleClientStatic", "watchConfigEnv", "cleanTestResources"] {
      assert!(composer.actions().contains(name), "missing {name}");
    }
  }
}
