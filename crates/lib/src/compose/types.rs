use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::suite::SuiteError;

/// What to do when two sources produce the same task name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
  /// The later write in traversal order replaces the earlier one.
  #[default]
  Overwrite,
  /// A collision is a configuration error.
  Reject,
}

/// Configuration errors detected during composition.
///
/// All of these are raised before anything is written to the action
/// registry, so a failed composition leaves nothing installable.
#[derive(Debug, Error)]
pub enum ComposeError {
  /// The source names a suite that is not registered.
  #[error("{group}.{source_name}: unknown suite '{suite}'")]
  UnknownSuite {
    group: String,
    source_name: String,
    suite: String,
  },

  /// The source declaration is malformed.
  #[error("{group}.{source_name}: {reason}")]
  InvalidSource {
    group: String,
    source_name: String,
    reason: String,
  },

  /// The suite could not decode the source's option bag.
  #[error("{group}.{source_name}: {error}")]
  InvalidOptions {
    group: String,
    source_name: String,
    #[source]
    error: SuiteError,
  },

  /// The suite refused the source.
  #[error("{group}.{source_name}: {error}")]
  Suite {
    group: String,
    source_name: String,
    #[source]
    error: SuiteError,
  },

  /// Two sources produced the same task name under [`CollisionPolicy::Reject`].
  #[error("task '{name}' is produced by both {first} and {second}")]
  NameCollision { name: String, first: String, second: String },

  /// `install` was called before a successful `generate`.
  #[error("actions must be generated before they are installed")]
  NotGenerated,
}

/// The tasks one source contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTasks {
  pub group: String,
  pub source: String,
  pub suite: String,
  pub tasks: Vec<String>,
}

/// Summary of a composition pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
  /// Per-source task names, in traversal order.
  pub sources: Vec<SourceTasks>,
  /// Names that were written more than once, in the order the overwrite happened.
  pub overwritten: Vec<String>,
}

impl GenerateReport {
  /// Total number of (name, action) pairs produced, including overwritten ones.
  pub fn produced(&self) -> usize {
    self.sources.iter().map(|s| s.tasks.len()).sum()
  }
}
