use std::any::Any;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

/// Errors reported by a [`Pipeline`](super::Pipeline).
#[derive(Debug, Error)]
pub enum PipelineError {
  /// A glob selector could not be parsed.
  #[error("invalid selector {pattern}: {message}")]
  Selector { pattern: String, message: String },

  /// Filesystem operation failed.
  #[error("io error at {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },

  /// A toolchain program could not be started.
  #[error("failed to spawn {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  /// A toolchain program exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}\n{output}")]
  CmdFailed {
    cmd: String,
    code: Option<i32>,
    output: String,
  },

  /// The filesystem watcher could not be set up.
  #[error("watch error: {0}")]
  Watch(#[from] notify::Error),
}

/// A batch of changed paths observed by a watcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeEvent {
  pub paths: Vec<PathBuf>,
}

impl ChangeEvent {
  pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
    Self {
      paths: paths.into_iter().collect(),
    }
  }
}

/// Stream of change batches produced by [`Pipeline::watch`](super::Pipeline::watch).
///
/// Events that queue up while a consumer is busy are coalesced into the next
/// batch returned by [`next`](Self::next). The stream ends once every sender
/// is dropped.
pub struct ChangeStream {
  rx: mpsc::Receiver<ChangeEvent>,
  debounce: Duration,
  _guard: Option<Box<dyn Any + Send>>,
}

impl ChangeStream {
  pub fn new(rx: mpsc::Receiver<ChangeEvent>) -> Self {
    Self {
      rx,
      debounce: Duration::ZERO,
      _guard: None,
    }
  }

  /// Wait this long after the first event of a batch before yielding it.
  pub fn with_debounce(mut self, debounce: Duration) -> Self {
    self.debounce = debounce;
    self
  }

  /// Keep `guard` (typically the OS watcher handle) alive as long as the stream.
  pub fn with_guard<G: Any + Send>(mut self, guard: G) -> Self {
    self._guard = Some(Box::new(guard));
    self
  }

  /// Wait for the next batch of changes. Returns `None` once the stream closes.
  pub async fn next(&mut self) -> Option<ChangeEvent> {
    let mut batch = self.rx.recv().await?;

    if !self.debounce.is_zero() {
      tokio::time::sleep(self.debounce).await;
    }

    while let Ok(more) = self.rx.try_recv() {
      batch.paths.extend(more.paths);
    }
    batch.paths.sort();
    batch.paths.dedup();

    Some(batch)
  }
}

impl std::fmt::Debug for ChangeStream {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ChangeStream")
      .field("debounce", &self.debounce)
      .finish_non_exhaustive()
  }
}
