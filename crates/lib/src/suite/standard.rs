//! The primary / clean / watch template used by every built-in suite.
//!
//! - primary: the suite-specific pipeline (`compile...` or `bundle...`)
//! - clean: removes the source's output, tolerating a missing output
//! - watch: observes the source's input and, on every change, runs clean and
//!   then primary strictly in sequence; a failed cycle is logged and the
//!   watch keeps going

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::action::{Action, ActionError, create_action, series};
use crate::host::{ChangeStream, Pipeline};
use crate::suite::naming::{task_name, verbs};
use crate::suite::{GroupRef, SourceRef, TaskList};

/// Build the `[primary, clean, watch]` task list for one source.
///
/// `primary` is the body of the suite's main action; `verb` names it.
pub fn standard_tasks<F, Fut>(
  pipeline: &Arc<dyn Pipeline>,
  verb: &str,
  group: GroupRef<'_>,
  source: SourceRef<'_>,
  primary: F,
) -> TaskList
where
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
  let primary_name = task_name(verb, group.name, source.name);
  let clean_name = task_name(verbs::CLEAN, group.name, source.name);
  let watch_name = task_name(verbs::WATCH, group.name, source.name);

  let primary = create_action([(primary_name.clone(), primary)]);
  let clean = clean_action(&clean_name, pipeline, &source.source.output);
  let rebuild = series(
    format!("{watch_name}:rebuild"),
    vec![clean.clone(), primary.clone()],
  );
  let watch = watch_action(&watch_name, pipeline, &source.source.input, rebuild);

  vec![(primary_name, primary), (clean_name, clean), (watch_name, watch)]
}

/// An action removing everything at `output`.
pub fn clean_action(name: &str, pipeline: &Arc<dyn Pipeline>, output: &Path) -> Action {
  let pipeline = Arc::clone(pipeline);
  let output = output.to_path_buf();

  Action::new(name, move || {
    let pipeline = Arc::clone(&pipeline);
    let output = output.clone();
    async move {
      pipeline.remove(&output).await?;
      Ok(())
    }
  })
}

/// An action that watches `input` and runs `on_change` after every change.
///
/// The action completes only when the pipeline's change stream closes.
pub fn watch_action(name: &str, pipeline: &Arc<dyn Pipeline>, input: &[String], on_change: Action) -> Action {
  let pipeline = Arc::clone(pipeline);
  let input: Arc<[String]> = input.into();
  let watch_name = name.to_string();

  Action::new(name, move || {
    let pipeline = Arc::clone(&pipeline);
    let input = Arc::clone(&input);
    let on_change = on_change.clone();
    let watch_name = watch_name.clone();
    async move {
      let changes = pipeline.watch(&input).await?;
      watch_loop(&watch_name, changes, &on_change).await;
      Ok(())
    }
  })
}

/// Run `on_change` once per batch from `changes` until the stream closes.
///
/// Each cycle finishes before the next batch is taken. Failures are logged and
/// do not end the loop.
pub async fn watch_loop(name: &str, mut changes: ChangeStream, on_change: &Action) {
  info!(task = name, "watching for changes");

  while let Some(batch) = changes.next().await {
    debug!(task = name, changed = batch.paths.len(), "change detected");
    match on_change.run().await {
      Ok(()) => info!(task = name, "rebuild complete"),
      Err(e) => error!(task = name, error = %e, "rebuild failed, still watching"),
    }
  }

  info!(task = name, "change stream closed");
}
