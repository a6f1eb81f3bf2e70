//! Terminal rendering for weave.
//!
//! Status lines go to stdout and problems to stderr. Color is applied only
//! when the target stream supports it, so piped output stays plain.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use taskweave_lib::compose::SourceTasks;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
  /// A command or task finished.
  Done,
  /// Neutral summary.
  Note,
  /// Something the user should look at; the command still succeeded.
  Warn,
  /// The command failed.
  Fail,
}

impl Tone {
  pub fn marker(self) -> &'static str {
    match self {
      Tone::Done => "✓",
      Tone::Note => "•",
      Tone::Warn => "⚠",
      Tone::Fail => "✗",
    }
  }

  fn stream(self) -> Stream {
    match self {
      Tone::Done | Tone::Note => Stream::Stdout,
      Tone::Warn | Tone::Fail => Stream::Stderr,
    }
  }
}

/// Print a one-line status message prefixed with the tone's marker.
pub fn status(tone: Tone, message: &str) {
  let stream = tone.stream();
  let marker = tone.marker();
  let marker = match tone {
    Tone::Done => marker.if_supports_color(stream, |s| s.green()).to_string(),
    Tone::Note => marker.if_supports_color(stream, |s| s.blue()).to_string(),
    Tone::Warn => marker.if_supports_color(stream, |s| s.yellow()).to_string(),
    Tone::Fail => marker.if_supports_color(stream, |s| s.red()).to_string(),
  };

  match tone.stream() {
    Stream::Stdout => println!("{marker} {message}"),
    _ => eprintln!("{marker} {message}"),
  }
}

/// The `group.source` label and the `(suite)` tag of a listing header.
fn source_header(source: &SourceTasks) -> (String, String) {
  (format!("{}.{}", source.group, source.source), format!("({})", source.suite))
}

pub fn task_row(name: &str) -> String {
  format!("  → {name}")
}

/// Print one source's header followed by the tasks it produced.
pub fn print_source(source: &SourceTasks) {
  let (name, suite) = source_header(source);
  println!(
    "{} {}",
    name.if_supports_color(Stream::Stdout, |s| s.bold()),
    suite.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
  for task in &source.tasks {
    println!("{}", task_row(task));
  }
}

/// Print the names whose earlier definitions were replaced during composition.
pub fn print_replaced(names: &[String]) {
  for name in names {
    eprintln!(
      "  {} {}",
      "replaced".if_supports_color(Stream::Stderr, |s| s.dimmed()),
      name
    );
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{json}");
  Ok(())
}

/// Short human form of a task run time: `340ms`, `4.2s`, `3m07s`.
pub fn format_elapsed(elapsed: Duration) -> String {
  let millis = elapsed.as_millis();
  if millis < 1000 {
    format!("{millis}ms")
  } else if millis < 60_000 {
    format!("{:.1}s", elapsed.as_secs_f64())
  } else {
    let secs = elapsed.as_secs();
    format!("{}m{:02}s", secs / 60, secs % 60)
  }
}
