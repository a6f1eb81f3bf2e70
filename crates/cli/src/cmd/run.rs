//! Implementation of the `weave run` command.
//!
//! Composes the configuration, installs the tasks into an in-memory runner,
//! and runs the requested tasks until they finish or Ctrl-C is pressed.
//! Watch tasks only finish on Ctrl-C.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use taskweave_lib::host::TaskRunner;

use crate::cmd::{Composed, compose};
use crate::output::{Tone, format_elapsed, status};

pub fn cmd_run(config: Option<&Path>, tasks: &[String], parallel: bool) -> Result<()> {
  let Composed { composer, .. } = compose(config)?;

  let mut runner = TaskRunner::new();
  let installed = composer.install(&mut runner)?;
  info!(installed, "tasks installed");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let started = Instant::now();

  let finished = rt.block_on(async {
    let work = async {
      if parallel {
        runner.run_parallel(tasks).await
      } else {
        runner.run_series(tasks).await
      }
    };

    tokio::select! {
      result = work => result.map(|()| true),
      _ = tokio::signal::ctrl_c() => Ok(false),
    }
  });

  let elapsed = format_elapsed(started.elapsed());
  if finished.context("Run failed")? {
    status(Tone::Done, &format!("Finished {} in {}", tasks.join(", "), elapsed));
  } else {
    status(Tone::Note, &format!("Interrupted after {}", elapsed));
  }

  Ok(())
}
