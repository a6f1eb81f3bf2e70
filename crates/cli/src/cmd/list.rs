//! Implementation of the `weave list` command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use taskweave_lib::compose::SourceTasks;

use crate::cmd::{Composed, compose};
use crate::output::{OutputFormat, Tone, print_json, print_replaced, print_source, status};

#[derive(Serialize)]
struct ListOutput<'a> {
  config: String,
  tasks: Vec<&'a str>,
  sources: &'a [SourceTasks],
  overwritten: &'a [String],
}

pub fn cmd_list(config: Option<&Path>, format: OutputFormat, verbose: bool) -> Result<()> {
  let Composed { path, composer, report } = compose(config)?;

  if format.is_json() {
    return print_json(&ListOutput {
      config: path.display().to_string(),
      tasks: composer.actions().names().collect(),
      sources: &report.sources,
      overwritten: &report.overwritten,
    });
  }

  status(
    Tone::Note,
    &format!(
      "{} tasks from {} sources in {}",
      composer.actions().len(),
      report.sources.len(),
      path.display()
    ),
  );

  for source in &report.sources {
    println!();
    print_source(source);
  }

  if !report.overwritten.is_empty() {
    println!();
    status(
      Tone::Warn,
      &format!(
        "{} task definitions were replaced by later sources with the same name",
        report.overwritten.len()
      ),
    );
    if verbose {
      print_replaced(&report.overwritten);
    }
  }

  Ok(())
}
