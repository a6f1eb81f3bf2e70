//! Project configuration (`weave.toml`).
//!
//! ```toml
//! [settings]
//! collisions = "overwrite"
//!
//! [toolchain]
//! tsc = "tsc"
//! sass = "sass"
//! debounce_ms = 200
//!
//! [groups.main.typescript]
//! suite = "typescript"
//! input = ["./src/main/typescript/**/*.ts"]
//! output = "./build/javascript/main"
//! tsconfig = "./src/main/typescript/tsconfig.json"
//! ```
//!
//! Every key of a source other than `suite`, `input` and `output` is handed
//! to the suite's [`parse_options`](crate::suite::Suite::parse_options).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::compose::{CollisionPolicy, ComposeError, Composer};
use crate::consts::{CONFIG_ENV, CONFIG_FILE_NAME, DEFAULT_DEBOUNCE_MS};
use crate::host::{LocalPipeline, Pipeline};
use crate::source::{Source, SourceGroup, SourceGroups};
use crate::suite::SuiteRegistry;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
  pub settings: Settings,
  pub toolchain: ToolchainConfig,
  /// Group name -> source name -> source.
  pub groups: BTreeMap<String, BTreeMap<String, RawSource>>,
}

/// Composition settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  pub collisions: CollisionPolicy,
}

/// External programs and timing used by the local pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
  /// TypeScript compiler executable.
  pub tsc: String,
  /// Sass compiler executable.
  pub sass: String,
  /// Quiet period used to coalesce file change events.
  pub debounce_ms: u64,
}

impl Default for ToolchainConfig {
  fn default() -> Self {
    Self {
      tsc: "tsc".to_string(),
      sass: "sass".to_string(),
      debounce_ms: DEFAULT_DEBOUNCE_MS,
    }
  }
}

impl ToolchainConfig {
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }
}

/// A source as written in the configuration file, before its suite has
/// interpreted the options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSource {
  pub suite: String,
  pub input: Selector,
  pub output: PathBuf,
  #[serde(flatten)]
  pub options: BTreeMap<String, serde_json::Value>,
}

/// One selector or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
  One(String),
  Many(Vec<String>),
}

impl Selector {
  pub fn to_vec(&self) -> Vec<String> {
    match self {
      Selector::One(selector) => vec![selector.clone()],
      Selector::Many(selectors) => selectors.clone(),
    }
  }
}

impl ProjectConfig {
  /// Parse configuration from TOML text.
  pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(text)
  }

  /// Read and parse the configuration file at `path`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    debug!(path = %path.display(), groups = config.groups.len(), "loaded config");
    Ok(config)
  }

  /// Resolve every raw source into a typed [`Source`].
  ///
  /// Each source's suite must be registered in `suites`; the suite decodes
  /// the source's options.
  pub fn source_groups(&self, suites: &SuiteRegistry) -> Result<SourceGroups, ComposeError> {
    let mut groups = SourceGroups::new();

    for (group_name, raw_group) in &self.groups {
      let mut group = SourceGroup::new();

      for (source_name, raw) in raw_group {
        let suite = suites.get(&raw.suite).ok_or_else(|| ComposeError::UnknownSuite {
          group: group_name.clone(),
          source_name: source_name.clone(),
          suite: raw.suite.clone(),
        })?;

        let options = suite
          .parse_options(&raw.options)
          .map_err(|error| ComposeError::InvalidOptions {
            group: group_name.clone(),
            source_name: source_name.clone(),
            error,
          })?;

        let source = Source::new(raw.suite.clone(), raw.input.to_vec(), raw.output.clone()).with_options(options);
        group.insert(source_name.clone(), source);
      }

      groups.insert(group_name.clone(), group);
    }

    Ok(groups)
  }

  /// Build a composer over the built-in suites and a local pipeline rooted
  /// at `root`.
  pub fn composer(&self, root: &Path) -> Result<Composer, ComposeError> {
    let pipeline: Arc<dyn Pipeline> = Arc::new(LocalPipeline::new(root, self.toolchain.clone()));
    let suites = SuiteRegistry::with_builtins(pipeline);
    let groups = self.source_groups(&suites)?;

    Ok(Composer::new(groups, suites).with_policy(self.settings.collisions))
  }
}

/// Pick the configuration file path.
///
/// An explicit path wins, then `WEAVE_CONFIG`, then `weave.toml` in the
/// working directory.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
  if let Some(path) = explicit {
    return path.to_path_buf();
  }

  match std::env::var_os(CONFIG_ENV) {
    Some(value) if !value.is_empty() => PathBuf::from(value),
    _ => PathBuf::from(CONFIG_FILE_NAME),
  }
}

/// Directory relative selectors in the configuration resolve against.
pub fn project_root(config_path: &Path) -> PathBuf {
  match config_path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  }
}
