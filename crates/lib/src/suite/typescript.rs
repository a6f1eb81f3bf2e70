//! Transform-and-emit suite: type-checked compile.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::host::Pipeline;
use crate::source::{SourceOptions, TypescriptOptions};
use crate::suite::naming::verbs;
use crate::suite::standard::standard_tasks;
use crate::suite::{GroupRef, SourceRef, Suite, SuiteError, TaskList, decode_options, options_kind};

/// Compiles matched sources with the type-checked compiler.
///
/// Options: `tsconfig`, the compiler project file.
pub struct TypescriptSuite {
  pipeline: Arc<dyn Pipeline>,
}

impl TypescriptSuite {
  pub const NAME: &'static str = "typescript";

  pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
    Self { pipeline }
  }
}

impl Suite for TypescriptSuite {
  fn name(&self) -> &str {
    Self::NAME
  }

  fn parse_options(&self, options: &BTreeMap<String, serde_json::Value>) -> Result<SourceOptions, SuiteError> {
    decode_options::<TypescriptOptions>(Self::NAME, options).map(SourceOptions::Typescript)
  }

  fn tasks(&self, group: GroupRef<'_>, source: SourceRef<'_>) -> Result<TaskList, SuiteError> {
    let options = match &source.source.options {
      SourceOptions::Typescript(options) => options.clone(),
      SourceOptions::None => TypescriptOptions::default(),
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
        pipeline.compile_script(&input, &output, &options).await?;
        Ok(())
      }
    };

    Ok(standard_tasks(&self.pipeline, verbs::COMPILE, group, source, compile))
  }
}
