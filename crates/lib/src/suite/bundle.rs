//! Passthrough-copy suite.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::host::Pipeline;
use crate::source::SourceOptions;
use crate::suite::naming::verbs;
use crate::suite::standard::standard_tasks;
use crate::suite::{GroupRef, SourceRef, Suite, SuiteError, TaskList, options_kind};

/// Copies matched files verbatim. Used for static assets, view templates,
/// and environment files. Takes no options.
pub struct BundleSuite {
  pipeline: Arc<dyn Pipeline>,
}

impl BundleSuite {
  pub const NAME: &'static str = "bundle";

  pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
    Self { pipeline }
  }
}

impl Suite for BundleSuite {
  fn name(&self) -> &str {
    Self::NAME
  }

  fn parse_options(&self, options: &BTreeMap<String, serde_json::Value>) -> Result<SourceOptions, SuiteError> {
    if options.is_empty() {
      return Ok(SourceOptions::None);
    }
    let keys: Vec<&str> = options.keys().map(String::as_str).collect();
    Err(SuiteError::InvalidOptions {
      suite: Self::NAME.to_string(),
      message: format!("takes no options, got: {}", keys.join(", ")),
    })
  }

  fn tasks(&self, group: GroupRef<'_>, source: SourceRef<'_>) -> Result<TaskList, SuiteError> {
    if source.source.options != SourceOptions::None {
      return Err(SuiteError::OptionsMismatch {
        suite: Self::NAME.to_string(),
        found: options_kind(&source.source.options),
      });
    }

    let pipeline = Arc::clone(&self.pipeline);
    let input: Arc<[String]> = source.source.input.as_slice().into();
    let output = source.source.output.clone();

    let bundle = move || {
      let pipeline = Arc::clone(&pipeline);
      let input = Arc::clone(&input);
      let output = output.clone();
      async move {
        pipeline.copy(&input, &output).await?;
        Ok(())
      }
    };

    Ok(standard_tasks(&self.pipeline, verbs::BUNDLE, group, source, bundle))
  }
}
