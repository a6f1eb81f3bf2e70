//! Local filesystem pipeline.
//!
//! Resolves selectors against a project root, copies and removes files with
//! `tokio::fs`, runs `tsc` and `sass` as child processes, and watches input
//! directories with `notify`.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use notify::{EventKind, RecursiveMode, Watcher};
use tokio::fs;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ToolchainConfig;
use crate::host::{ChangeEvent, ChangeStream, Pipeline, PipelineError};
use crate::source::{SassOptions, TypescriptOptions};
use crate::util::selector::{check_selector, glob_base, resolve_selector};

/// Capacity of the channel between the OS watcher thread and the watch loop.
const WATCH_CHANNEL_CAPACITY: usize = 64;

/// A file matched by a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
  /// Absolute path of the file.
  pub path: PathBuf,
  /// Path relative to the selector's glob base.
  pub relative: PathBuf,
}

/// [`Pipeline`] implementation backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalPipeline {
  root: PathBuf,
  toolchain: ToolchainConfig,
}

impl LocalPipeline {
  /// Create a pipeline resolving relative selectors and outputs against `root`.
  pub fn new(root: impl Into<PathBuf>, toolchain: ToolchainConfig) -> Self {
    let root = root.into();
    let root = std::fs::canonicalize(&root).unwrap_or(root);
    Self { root, toolchain }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path.strip_prefix(".").unwrap_or(path))
    }
  }

  /// The directory to register with the OS watcher for a glob base.
  ///
  /// A base that does not exist yet is covered by its nearest existing
  /// ancestor, so files created under it later are still seen.
  fn watch_root(&self, base: &Path) -> PathBuf {
    match base.ancestors().find(|dir| dir.is_dir()) {
      Some(dir) if dir == base => dir.to_path_buf(),
      Some(dir) => {
        debug!(base = %base.display(), watching = %dir.display(), "watch base missing, watching ancestor");
        dir.to_path_buf()
      }
      None => self.root.clone(),
    }
  }

  /// Expand `input` selectors into the files they currently match.
  ///
  /// Selectors that match nothing are not an error.
  pub fn expand(&self, input: &[String]) -> Result<Vec<MatchedFile>, PipelineError> {
    let mut files = Vec::new();

    for selector in input {
      check_selector(selector).map_err(|message| PipelineError::Selector {
        pattern: selector.clone(),
        message: message.to_string(),
      })?;
      let pattern = resolve_selector(&self.root, selector);
      let base = glob_base(&pattern);
      let paths = glob::glob(&pattern).map_err(|e| PipelineError::Selector {
        pattern: selector.clone(),
        message: e.to_string(),
      })?;

      for entry in paths {
        let path = entry.map_err(|e| {
          let path = e.path().to_path_buf();
          PipelineError::Io { path, source: e.into() }
        })?;
        if !path.is_file() {
          continue;
        }
        let relative = match path.strip_prefix(&base) {
          Ok(relative) => relative.to_path_buf(),
          Err(_) => path.file_name().map(PathBuf::from).unwrap_or_default(),
        };
        files.push(MatchedFile { path, relative });
      }
    }

    debug!(selectors = input.len(), files = files.len(), "expanded selectors");
    Ok(files)
  }

  async fn exec(&self, program: &str, args: Vec<OsString>) -> Result<(), PipelineError> {
    let cmd = std::iter::once(program.to_string())
      .chain(args.iter().map(|arg| arg.to_string_lossy().into_owned()))
      .collect::<Vec<_>>()
      .join(" ");
    info!(cmd = %cmd, "executing command");

    let output = Command::new(program)
      .args(&args)
      .current_dir(&self.root)
      .output()
      .await
      .map_err(|source| PipelineError::Spawn {
        program: program.to_string(),
        source,
      })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
      // tsc reports diagnostics on stdout, sass on stderr
      let output_text = if stderr.is_empty() { stdout } else { stderr };
      return Err(PipelineError::CmdFailed {
        cmd,
        code: output.status.code(),
        output: output_text,
      });
    }

    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command output");
    }
    Ok(())
  }
}

#[async_trait]
impl Pipeline for LocalPipeline {
  async fn compile_script(
    &self,
    input: &[String],
    output: &Path,
    options: &TypescriptOptions,
  ) -> Result<(), PipelineError> {
    let files = self.expand(input)?;
    if files.is_empty() {
      debug!(output = %output.display(), "no script sources matched, skipping compile");
      return Ok(());
    }

    let out_dir = self.resolve(output);
    let mut args: Vec<OsString> = Vec::new();

    match &options.tsconfig {
      // The project file decides which files are compiled.
      Some(tsconfig) => {
        args.push("--project".into());
        args.push(self.resolve(tsconfig).into_os_string());
        args.push("--outDir".into());
        args.push(out_dir.into_os_string());
      }
      None => {
        args.push("--outDir".into());
        args.push(out_dir.into_os_string());
        args.extend(files.into_iter().map(|file| file.path.into_os_string()));
      }
    }

    self.exec(&self.toolchain.tsc, args).await
  }

  async fn compile_style(&self, input: &[String], output: &Path, options: &SassOptions) -> Result<(), PipelineError> {
    let out_dir = self.resolve(output);
    let pairs: Vec<OsString> = self
      .expand(input)?
      .into_iter()
      .filter(|file| {
        !file
          .path
          .file_name()
          .is_some_and(|name| name.to_string_lossy().starts_with('_'))
      })
      .map(|file| {
        let dest = out_dir.join(&file.relative).with_extension("css");
        let mut pair = file.path.into_os_string();
        pair.push(":");
        pair.push(dest.as_os_str());
        pair
      })
      .collect();

    if pairs.is_empty() {
      debug!(output = %output.display(), "no stylesheets matched, skipping compile");
      return Ok(());
    }

    let mut args: Vec<OsString> = vec![format!("--style={}", options.style.as_str()).into()];
    if !options.source_map {
      args.push("--no-source-map".into());
    }
    args.extend(pairs);

    self.exec(&self.toolchain.sass, args).await
  }

  async fn copy(&self, input: &[String], output: &Path) -> Result<(), PipelineError> {
    let out_dir = self.resolve(output);
    let files = self.expand(input)?;
    debug!(files = files.len(), output = %out_dir.display(), "copying files");

    for file in files {
      let dest = out_dir.join(&file.relative);
      if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await.map_err(|source| PipelineError::Io {
          path: parent.to_path_buf(),
          source,
        })?;
      }
      fs::copy(&file.path, &dest)
        .await
        .map_err(|source| PipelineError::Io { path: dest.clone(), source })?;
    }

    Ok(())
  }

  async fn remove(&self, output: &Path) -> Result<(), PipelineError> {
    let target = self.resolve(output);

    let result = match fs::symlink_metadata(&target).await {
      Ok(meta) if meta.is_dir() => fs::remove_dir_all(&target).await,
      Ok(_) => fs::remove_file(&target).await,
      Err(e) => Err(e),
    };

    match result {
      Ok(()) => {
        debug!(path = %target.display(), "removed output");
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %target.display(), "nothing to clean");
        Ok(())
      }
      Err(source) => Err(PipelineError::Io { path: target, source }),
    }
  }

  async fn watch(&self, input: &[String]) -> Result<ChangeStream, PipelineError> {
    let mut patterns = Vec::new();
    let mut roots = BTreeSet::new();

    for selector in input {
      check_selector(selector).map_err(|message| PipelineError::Selector {
        pattern: selector.clone(),
        message: message.to_string(),
      })?;
      let resolved = resolve_selector(&self.root, selector);
      let pattern = glob::Pattern::new(&resolved).map_err(|e| PipelineError::Selector {
        pattern: selector.clone(),
        message: e.to_string(),
      })?;
      patterns.push(pattern);

      let base = glob_base(&resolved);
      let base = if base.as_os_str().is_empty() { self.root.clone() } else { base };
      roots.insert(self.watch_root(&base));
    }

    let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
      Ok(event) => {
        if !matches!(
          event.kind,
          EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
          return;
        }
        let paths: Vec<PathBuf> = event
          .paths
          .into_iter()
          .filter(|path| patterns.iter().any(|pattern| pattern.matches_path(path)))
          .collect();
        // A full channel already holds a pending batch; dropping is fine.
        if !paths.is_empty() {
          let _ = tx.try_send(ChangeEvent { paths });
        }
      }
      Err(e) => warn!(error = %e, "watcher error"),
    })?;

    for root in &roots {
      watcher.watch(root, RecursiveMode::Recursive)?;
      debug!(path = %root.display(), "watching");
    }

    Ok(
      ChangeStream::new(rx)
        .with_debounce(self.toolchain.debounce())
        .with_guard(watcher),
    )
  }
}
