//! Seams to the outside world.
//!
//! The composition engine never performs I/O itself. Everything it needs from
//! its surroundings goes through two traits:
//!
//! - [`TaskHost`] - receives the finished actions under their names
//! - [`Pipeline`] - the file-transformation and watch primitives the built-in
//!   suites call from inside their action bodies
//!
//! Reference implementations live alongside:
//!
//! - [`TaskRunner`] - an in-memory host that runs tasks by name
//! - [`LocalPipeline`] - glob expansion, copying, `tsc`/`sass` child
//!   processes, and `notify`-based watching on the local filesystem

pub mod local;
pub mod runner;
mod types;

pub use local::LocalPipeline;
pub use runner::{RunError, TaskRunner};
pub use types::*;

use std::path::Path;

use async_trait::async_trait;

use crate::action::Action;
use crate::source::{SassOptions, TypescriptOptions};

/// An external task runner that installed actions are handed to.
pub trait TaskHost {
  /// Register `action` under `name`.
  fn register_task(&mut self, name: &str, action: Action);
}

/// File pipelines used by the built-in suites.
///
/// `input` is always the list of glob selectors declared on the source, and
/// `output` its output location, both uninterpreted until they reach here.
#[async_trait]
pub trait Pipeline: Send + Sync {
  /// Compile type-checked sources matched by `input` into `output`.
  async fn compile_script(&self, input: &[String], output: &Path, options: &TypescriptOptions)
  -> Result<(), PipelineError>;

  /// Compile stylesheets matched by `input` into `output`.
  async fn compile_style(&self, input: &[String], output: &Path, options: &SassOptions) -> Result<(), PipelineError>;

  /// Copy files matched by `input` verbatim into `output`.
  async fn copy(&self, input: &[String], output: &Path) -> Result<(), PipelineError>;

  /// Remove everything at `output`. Succeeds if nothing is there.
  async fn remove(&self, output: &Path) -> Result<(), PipelineError>;

  /// Start observing files matched by `input`.
  async fn watch(&self, input: &[String]) -> Result<ChangeStream, PipelineError>;
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;
  use std::time::Duration;
  use tokio::sync::mpsc;

  #[tokio::test]
  async fn change_stream_coalesces_queued_events() {
    let (tx, rx) = mpsc::channel(8);
    let mut stream = ChangeStream::new(rx);

    tx.send(ChangeEvent::new([PathBuf::from("b.ts")])).await.unwrap();
    tx.send(ChangeEvent::new([PathBuf::from("a.ts")])).await.unwrap();
    tx.send(ChangeEvent::new([PathBuf::from("b.ts")])).await.unwrap();

    let batch = stream.next().await.unwrap();
    assert_eq!(batch.paths, vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")]);

    drop(tx);
    assert!(stream.next().await.is_none());
  }

  #[tokio::test]
  async fn change_stream_debounce_collects_late_events() {
    let (tx, rx) = mpsc::channel(8);
    let mut stream = ChangeStream::new(rx).with_debounce(Duration::from_millis(50));

    tx.send(ChangeEvent::new([PathBuf::from("a.ts")])).await.unwrap();
    let late = tx.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(5)).await;
      late.send(ChangeEvent::new([PathBuf::from("c.ts")])).await.unwrap();
    });

    let batch = stream.next().await.unwrap();
    assert_eq!(batch.paths, vec![PathBuf::from("a.ts"), PathBuf::from("c.ts")]);
  }
}
