//! Suites: strategies that turn a source into named actions.
//!
//! A [`Suite`] receives the group a source belongs to and the source itself,
//! and returns the ordered `(name, action)` pairs it wants registered. It only
//! describes work; nothing runs until a host executes the actions.
//!
//! # Built-in suites
//!
//! | Name         | Type               | Primary verb |
//! |--------------|--------------------|--------------|
//! | `typescript` | [`TypescriptSuite`] | `compile`   |
//! | `sass`       | [`SassSuite`]       | `compile`   |
//! | `bundle`     | [`BundleSuite`]     | `bundle`    |
//!
//! Each built-in returns primary, clean, and watch actions, in that order,
//! named by [`naming::task_name`].

mod bundle;
pub mod naming;
mod sass;
pub mod standard;
mod typescript;

pub use bundle::BundleSuite;
pub use sass::SassSuite;
pub use typescript::TypescriptSuite;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::action::Action;
use crate::host::Pipeline;
use crate::source::{Source, SourceGroup, SourceOptions};

/// Ordered `(task name, action)` pairs produced by a suite.
pub type TaskList = Vec<(String, Action)>;

/// The group context handed to a suite.
#[derive(Debug, Clone, Copy)]
pub struct GroupRef<'a> {
  pub name: &'a str,
  pub group: &'a SourceGroup,
}

/// The source context handed to a suite.
#[derive(Debug, Clone, Copy)]
pub struct SourceRef<'a> {
  pub name: &'a str,
  pub source: &'a Source,
}

/// Errors a suite can report about a source it was asked to expand.
#[derive(Debug, Error)]
pub enum SuiteError {
  /// The source carries options for a different suite.
  #[error("suite {suite} cannot use {found} options")]
  OptionsMismatch { suite: String, found: &'static str },

  /// The options could not be decoded.
  #[error("invalid options for suite {suite}: {message}")]
  InvalidOptions { suite: String, message: String },

  /// The suite produced a task with an empty name.
  #[error("suite {0} produced a task with an empty name")]
  EmptyTaskName(String),
}

/// A pluggable strategy expanding one source into named actions.
///
/// Implementations must be deterministic: the same group and source must
/// always yield the same task names in the same order.
pub trait Suite: Send + Sync {
  /// Name the suite is registered under.
  fn name(&self) -> &str;

  /// Turn the raw option bag of a configured source into typed options.
  ///
  /// The default keeps the bag as [`SourceOptions::Custom`].
  fn parse_options(&self, options: &BTreeMap<String, serde_json::Value>) -> Result<SourceOptions, SuiteError> {
    if options.is_empty() {
      Ok(SourceOptions::None)
    } else {
      Ok(SourceOptions::Custom(options.clone()))
    }
  }

  /// Describe the actions for `source` within `group`.
  fn tasks(&self, group: GroupRef<'_>, source: SourceRef<'_>) -> Result<TaskList, SuiteError>;
}

/// Decode a raw option bag into a typed options struct.
pub fn decode_options<T: DeserializeOwned>(
  suite: &str,
  options: &BTreeMap<String, serde_json::Value>,
) -> Result<T, SuiteError> {
  let object: serde_json::Map<String, serde_json::Value> = options.clone().into_iter().collect();
  serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| SuiteError::InvalidOptions {
    suite: suite.to_string(),
    message: e.to_string(),
  })
}

/// Short label for an options variant, used in error messages.
pub fn options_kind(options: &SourceOptions) -> &'static str {
  match options {
    SourceOptions::None => "no",
    SourceOptions::Typescript(_) => "typescript",
    SourceOptions::Sass(_) => "sass",
    SourceOptions::Custom(_) => "custom",
  }
}

/// Suites available to configuration, keyed by name.
#[derive(Clone, Default)]
pub struct SuiteRegistry {
  suites: BTreeMap<String, Arc<dyn Suite>>,
}

impl SuiteRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a registry holding the three built-in suites.
  pub fn with_builtins(pipeline: Arc<dyn Pipeline>) -> Self {
    let mut registry = Self::new();
    registry.register(Arc::new(TypescriptSuite::new(Arc::clone(&pipeline))));
    registry.register(Arc::new(SassSuite::new(Arc::clone(&pipeline))));
    registry.register(Arc::new(BundleSuite::new(pipeline)));
    registry
  }

  /// Register a suite under its own name, returning any suite it replaced.
  pub fn register(&mut self, suite: Arc<dyn Suite>) -> Option<Arc<dyn Suite>> {
    self.suites.insert(suite.name().to_string(), suite)
  }

  pub fn get(&self, name: &str) -> Option<&Arc<dyn Suite>> {
    self.suites.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.suites.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.suites.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.suites.len()
  }

  pub fn is_empty(&self) -> bool {
    self.suites.is_empty()
  }
}

impl fmt::Debug for SuiteRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.suites.keys()).finish()
  }
}
