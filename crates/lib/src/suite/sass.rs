//! Style-compile suite.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::host::Pipeline;
use crate::source::{SassOptions, SourceOptions};
use crate::suite::naming::verbs;
use crate::suite::standard::standard_tasks;
use crate::suite::{GroupRef, SourceRef, Suite, SuiteError, TaskList, decode_options, options_kind};

/// Compiles matched stylesheets to CSS.
///
/// Options: `style` (`expanded` or `compressed`) and `source_map`.
pub struct SassSuite {
  pipeline: Arc<dyn Pipeline>,
}

impl SassSuite {
  pub const NAME: &'static str = "sass";

  pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
    Self { pipeline }
  }
}

impl Suite for SassSuite {
  fn name(&self) -> &str {
    Self::NAME
  }

  fn parse_options(&self, options: &BTreeMap<String, serde_json::Value>) -> Result<SourceOptions, SuiteError> {
    decode_options::<SassOptions>(Self::NAME, options).map(SourceOptions::Sass)
  }

  fn tasks(&self, group: GroupRef<'_>, source: SourceRef<'_>) -> Result<TaskList, SuiteError> {
    let options = match &source.source.options {
      SourceOptions::Sass(options) => options.clone(),
      SourceOptions::None => SassOptions::default(),
      other => {
        return Err(SuiteError::OptionsMismatch {
          suite: Self::NAME.to_string(),
          found: options_kind(other),
        });
      }
    };

    let pipeline = Arc::clone(&self.pipeline);
    let input: Arc<[String]> = source.source.input.as_slice().into();
    let output = source.source.output.clone();

    let compile = move || {
      let pipeline = Arc::clone(&pipeline);
      let input = Arc::clone(&input);
      let output = output.clone();
      let options = options.clone();
      async move {
        pipeline.compile_style(&input, &output, &options).await?;
        Ok(())
      }
    };

    Ok(standard_tasks(&self.pipeline, verbs::COMPILE, group, source, compile))
  }
}
