//! The composition engine.
//!
//! [`Composer`] owns the three registries a composition needs (source groups,
//! suites, and actions) and expands every group × source through its suite
//! into one flat [`ActionRegistry`].
//!
//! # Phases
//!
//! 1. **Resolve** - validate each source, look up its suite, and collect the
//!    `(name, action)` pairs it produces. Any configuration error aborts here,
//!    before the action registry is touched.
//! 2. **Merge** - write every pair into the registry in traversal order. A
//!    name written twice keeps the later action (see [`CollisionPolicy`]).
//!
//! Composition is synchronous and performs no I/O.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskweave_lib::compose::Composer;
//! use taskweave_lib::suite::SuiteRegistry;
//!
//! let suites = SuiteRegistry::with_builtins(pipeline);
//! let mut composer = Composer::new(groups, suites);
//! composer.generate()?;
//! composer.install(&mut runner)?;
//! ```

mod types;

pub use types::*;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::action::{Action, ActionRegistry};
use crate::host::TaskHost;
use crate::source::{Source, SourceGroups};
use crate::suite::{GroupRef, SourceRef, SuiteError, SuiteRegistry};

/// Composition context: source groups, suites, and the resulting actions.
#[derive(Debug)]
pub struct Composer {
  groups: SourceGroups,
  suites: SuiteRegistry,
  actions: ActionRegistry,
  policy: CollisionPolicy,
  generated: bool,
}

/// A task produced during the resolve phase, tagged with where it came from.
struct Produced {
  origin: String,
  name: String,
  action: Action,
}

impl Composer {
  pub fn new(groups: SourceGroups, suites: SuiteRegistry) -> Self {
    Self {
      groups,
      suites,
      actions: ActionRegistry::new(),
      policy: CollisionPolicy::default(),
      generated: false,
    }
  }

  pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn groups(&self) -> &SourceGroups {
    &self.groups
  }

  pub fn suites(&self) -> &SuiteRegistry {
    &self.suites
  }

  pub fn actions(&self) -> &ActionRegistry {
    &self.actions
  }

  pub fn policy(&self) -> CollisionPolicy {
    self.policy
  }

  /// Empty the action registry so that `generate` can run again from scratch.
  pub fn clear_actions(&mut self) {
    self.actions.clear();
    self.generated = false;
  }

  /// Expand every source into actions and merge them into the registry.
  ///
  /// Running this twice without [`clear_actions`](Self::clear_actions) merges
  /// into the same registry again, so every name collides with itself.
  pub fn generate(&mut self) -> Result<GenerateReport, ComposeError> {
    info!(
      groups = self.groups.len(),
      sources = self.groups.source_count(),
      "starting composition"
    );

    let mut report = GenerateReport::default();
    let produced = self.resolve(&mut report)?;

    if self.policy == CollisionPolicy::Reject {
      self.check_collisions(&produced)?;
    }

    for Produced { origin, name, action } in produced {
      if self.actions.insert(name.clone(), action).is_some() {
        warn!(task = %name, origin = %origin, "task name collision, later definition replaces earlier one");
        report.overwritten.push(name);
      }
    }

    self.generated = true;
    info!(
      tasks = self.actions.len(),
      overwritten = report.overwritten.len(),
      "composition complete"
    );

    Ok(report)
  }

  fn resolve(&self, report: &mut GenerateReport) -> Result<Vec<Produced>, ComposeError> {
    let mut produced = Vec::new();

    for (group_name, group) in self.groups.iter() {
      for (source_name, source) in group.iter() {
        validate_source(group_name, source_name, source)?;

        let suite = self.suites.get(&source.suite).ok_or_else(|| ComposeError::UnknownSuite {
          group: group_name.to_string(),
          source_name: source_name.to_string(),
          suite: source.suite.clone(),
        })?;

        let suite_error = |error: SuiteError| ComposeError::Suite {
          group: group_name.to_string(),
          source_name: source_name.to_string(),
          error,
        };

        let tasks = suite
          .tasks(
            GroupRef {
              name: group_name,
              group,
            },
            SourceRef {
              name: source_name,
              source,
            },
          )
          .map_err(suite_error)?;

        debug!(
          group = group_name,
          source = source_name,
          suite = %source.suite,
          tasks = tasks.len(),
          "expanded source"
        );

        let origin = format!("{group_name}.{source_name}");
        let mut names = Vec::with_capacity(tasks.len());
        for (name, action) in tasks {
          if name.is_empty() {
            return Err(suite_error(SuiteError::EmptyTaskName(source.suite.clone())));
          }
          names.push(name.clone());
          produced.push(Produced {
            origin: origin.clone(),
            name,
            action,
          });
        }

        report.sources.push(SourceTasks {
          group: group_name.to_string(),
          source: source_name.to_string(),
          suite: source.suite.clone(),
          tasks: names,
        });
      }
    }

    Ok(produced)
  }

  fn check_collisions(&self, produced: &[Produced]) -> Result<(), ComposeError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();

    for item in produced {
      if self.actions.contains(&item.name) {
        return Err(ComposeError::NameCollision {
          name: item.name.clone(),
          first: "an earlier composition".to_string(),
          second: item.origin.clone(),
        });
      }
      if let Some(first) = seen.insert(&item.name, &item.origin) {
        return Err(ComposeError::NameCollision {
          name: item.name.clone(),
          first: first.to_string(),
          second: item.origin.clone(),
        });
      }
    }

    Ok(())
  }

  /// Register every generated action with `host` under its name.
  ///
  /// Returns the number of installed tasks.
  pub fn install(&self, host: &mut dyn TaskHost) -> Result<usize, ComposeError> {
    if !self.generated {
      return Err(ComposeError::NotGenerated);
    }

    for (name, action) in self.actions.iter() {
      host.register_task(name, action.clone());
    }

    debug!(tasks = self.actions.len(), "installed tasks");
    Ok(self.actions.len())
  }

  /// Consume the composer, keeping only the generated actions.
  pub fn into_actions(self) -> ActionRegistry {
    self.actions
  }
}

fn validate_source(group: &str, source_name: &str, source: &Source) -> Result<(), ComposeError> {
  let invalid = |reason: &str| ComposeError::InvalidSource {
    group: group.to_string(),
    source_name: source_name.to_string(),
    reason: reason.to_string(),
  };

  if group.is_empty() {
    return Err(invalid("group name must not be empty"));
  }
  if source_name.is_empty() {
    return Err(invalid("source name must not be empty"));
  }
  if source.input.is_empty() {
    return Err(invalid("input must name at least one selector"));
  }
  if source.input.iter().any(|selector| selector.trim().is_empty()) {
    return Err(invalid("input selectors must not be empty"));
  }
  if source.output.as_os_str().is_empty() {
    return Err(invalid("output must not be empty"));
  }

  Ok(())
}
