//! In-memory task host.

use std::collections::BTreeMap;
use std::time::Instant;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::action::{Action, ActionError};
use crate::host::TaskHost;

/// Errors returned when running installed tasks.
#[derive(Debug, Error)]
pub enum RunError {
  /// No task is registered under this name.
  #[error("task not found: {0}")]
  TaskNotFound(String),

  /// The task ran and failed.
  #[error("task {task} failed: {source}")]
  Failed {
    task: String,
    #[source]
    source: ActionError,
  },

  /// A task panicked or was cancelled while running in parallel.
  #[error("parallel task did not complete: {0}")]
  Aborted(String),
}

/// A [`TaskHost`] that keeps tasks in memory and runs them by name.
#[derive(Debug, Default)]
pub struct TaskRunner {
  tasks: BTreeMap<String, Action>,
}

impl TaskHost for TaskRunner {
  fn register_task(&mut self, name: &str, action: Action) {
    if self.tasks.insert(name.to_string(), action).is_some() {
      debug!(task = name, "replacing registered task");
    }
  }
}

impl TaskRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&Action> {
    self.tasks.get(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.tasks.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  fn lookup(&self, names: &[String]) -> Result<Vec<Action>, RunError> {
    names
      .iter()
      .map(|name| self.get(name).cloned().ok_or_else(|| RunError::TaskNotFound(name.clone())))
      .collect()
  }

  /// Run a single task to completion.
  pub async fn run(&self, name: &str) -> Result<(), RunError> {
    let action = self.get(name).ok_or_else(|| RunError::TaskNotFound(name.to_string()))?;
    run_action(action).await
  }

  /// Run tasks one after another, stopping at the first failure.
  ///
  /// All names are checked before anything runs.
  pub async fn run_series(&self, names: &[String]) -> Result<(), RunError> {
    let actions = self.lookup(names)?;
    for action in &actions {
      run_action(action).await?;
    }
    Ok(())
  }

  /// Run tasks concurrently and wait for all of them.
  ///
  /// Returns the first failure observed; the remaining tasks still finish.
  pub async fn run_parallel(&self, names: &[String]) -> Result<(), RunError> {
    let actions = self.lookup(names)?;
    let mut set = JoinSet::new();

    for action in actions {
      set.spawn(async move { run_action(&action).await });
    }

    let mut first_error = None;
    while let Some(joined) = set.join_next().await {
      let result = match joined {
        Ok(result) => result,
        Err(e) => Err(RunError::Aborted(e.to_string())),
      };
      if let Err(e) = result {
        first_error.get_or_insert(e);
      }
    }

    match first_error {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }
}

async fn run_action(action: &Action) -> Result<(), RunError> {
  let task = action.name();
  info!(task, "starting");
  let started = Instant::now();

  match action.run().await {
    Ok(()) => {
      info!(task, elapsed_ms = started.elapsed().as_millis() as u64, "finished");
      Ok(())
    }
    Err(source) => {
      error!(task, error = %source, "failed");
      Err(RunError::Failed {
        task: task.to_string(),
        source,
      })
    }
  }
}
