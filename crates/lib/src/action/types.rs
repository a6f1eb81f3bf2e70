use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::host::PipelineError;

/// Future returned by running an [`Action`].
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>> + Send + 'static>>;

type ActionBody = dyn Fn() -> ActionFuture + Send + Sync;

/// Errors that can occur while an action runs.
///
/// These only ever surface from [`Action::run`]. Composition has already
/// finished by the time an action executes, so none of these flow back
/// through the composition engine.
#[derive(Debug, Error)]
pub enum ActionError {
  /// The underlying pipeline (compiler, copy, watch) failed.
  #[error(transparent)]
  Pipeline(#[from] PipelineError),

  /// A custom action body reported a failure.
  #[error("action {action} failed: {message}")]
  Failed { action: String, message: String },
}

/// A named, zero-argument, asynchronous unit of work.
///
/// Cloning an `Action` is cheap: the body is shared. Every call to
/// [`run`](Self::run) produces a fresh future, so one action can be run many
/// times (a watch loop runs its compile action once per change).
///
/// The name is the diagnostic identifier shown in logs and task listings.
#[derive(Clone)]
pub struct Action {
  name: Arc<str>,
  body: Arc<ActionBody>,
}

impl Action {
  /// Wrap `body` as an action displayed under `name`.
  pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
  {
    let name: String = name.into();
    Self {
      name: Arc::from(name),
      body: Arc::new(move || Box::pin(body()) as ActionFuture),
    }
  }

  /// The diagnostic identifier attached to this action.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Start the action. The returned future resolves when the work completes.
  pub fn run(&self) -> ActionFuture {
    (self.body)()
  }

  /// Returns true if both actions share the same body.
  pub fn same_body(&self, other: &Action) -> bool {
    Arc::ptr_eq(&self.body, &other.body)
  }
}

impl fmt::Debug for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Action").field("name", &self.name).finish_non_exhaustive()
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
