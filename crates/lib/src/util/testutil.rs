//! Test doubles for taskweave-lib.
//!
//! [`RecordingPipeline`] stands in for the real toolchain: it records every
//! pipeline call, can hold `remove` until a test releases it, and hands the
//! test a sender that drives the watch stream.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore, mpsc};

use crate::host::{ChangeEvent, ChangeStream, Pipeline, PipelineError};
use crate::source::{SassOptions, TypescriptOptions};

/// A recorded pipeline call, identified by its output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  CompileScript(PathBuf),
  CompileStyle(PathBuf),
  Copy(PathBuf),
  Remove(PathBuf),
}

#[derive(Default)]
pub struct RecordingPipeline {
  calls: Mutex<Vec<Call>>,
  remove_gate: Mutex<Option<Arc<Semaphore>>>,
  remove_started: Notify,
  copy_finished: Notify,
  fail_copy: AtomicBool,
  changes: Mutex<Option<mpsc::Receiver<ChangeEvent>>>,
}

/// Drives the change stream of a [`RecordingPipeline`].
pub struct ChangeSender(mpsc::Sender<ChangeEvent>);

impl ChangeSender {
  pub async fn send(&self, path: PathBuf) {
    self.0.send(ChangeEvent::new([path])).await.unwrap();
  }
}

impl RecordingPipeline {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn shared() -> Arc<dyn Pipeline> {
    Self::new()
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().unwrap().clone()
  }

  /// Make `remove` block until the returned semaphore gets a permit.
  pub fn gate_remove(&self) -> Arc<Semaphore> {
    let gate = Arc::new(Semaphore::new(0));
    *self.remove_gate.lock().unwrap() = Some(Arc::clone(&gate));
    gate
  }

  /// Make the next `copy` fail.
  pub fn fail_next_copy(&self) {
    self.fail_copy.store(true, Ordering::SeqCst);
  }

  /// Create the channel the next `watch` call will read from.
  pub fn change_sender(&self) -> ChangeSender {
    let (tx, rx) = mpsc::channel(16);
    *self.changes.lock().unwrap() = Some(rx);
    ChangeSender(tx)
  }

  /// Resolves once a `remove` call has begun.
  pub async fn remove_started(&self) {
    self.remove_started.notified().await;
  }

  /// Resolves once a `copy` call has completed, successfully or not.
  pub async fn copy_finished(&self) {
    self.copy_finished.notified().await;
  }

  fn record(&self, call: Call) {
    self.calls.lock().unwrap().push(call);
  }
}

#[async_trait]
impl Pipeline for RecordingPipeline {
  async fn compile_script(
    &self,
    _input: &[String],
    output: &Path,
    _options: &TypescriptOptions,
  ) -> Result<(), PipelineError> {
    self.record(Call::CompileScript(output.to_path_buf()));
    Ok(())
  }

  async fn compile_style(&self, _input: &[String], output: &Path, _options: &SassOptions) -> Result<(), PipelineError> {
    self.record(Call::CompileStyle(output.to_path_buf()));
    Ok(())
  }

  async fn copy(&self, _input: &[String], output: &Path) -> Result<(), PipelineError> {
    self.record(Call::Copy(output.to_path_buf()));
    let result = if self.fail_copy.swap(false, Ordering::SeqCst) {
      Err(PipelineError::Io {
        path: output.to_path_buf(),
        source: std::io::Error::other("injected copy failure"),
      })
    } else {
      Ok(())
    };
    self.copy_finished.notify_one();
    result
  }

  async fn remove(&self, output: &Path) -> Result<(), PipelineError> {
    self.record(Call::Remove(output.to_path_buf()));
    self.remove_started.notify_one();

    let gate = self.remove_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
      gate.acquire().await.unwrap().forget();
    }
    Ok(())
  }

  async fn watch(&self, _input: &[String]) -> Result<ChangeStream, PipelineError> {
    let rx = self.changes.lock().unwrap().take();
    match rx {
      Some(rx) => Ok(ChangeStream::new(rx)),
      None => Err(PipelineError::Io {
        path: PathBuf::new(),
        source: std::io::Error::other("no change sender registered"),
      }),
    }
  }
}
