use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One declared unit of work.
///
/// A source names the suite that governs it, the glob selectors it reads, and
/// the single output location it writes. Selectors and output are opaque to
/// the composition engine; only the suite and its pipeline interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
  /// Name of the suite in the [`SuiteRegistry`](crate::suite::SuiteRegistry).
  pub suite: String,
  /// One or more glob selectors.
  pub input: Vec<String>,
  /// Output location.
  pub output: PathBuf,
  /// Suite-specific options.
  pub options: SourceOptions,
}

impl Source {
  pub fn new<I, S>(suite: impl Into<String>, input: I, output: impl Into<PathBuf>) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      suite: suite.into(),
      input: input.into_iter().map(Into::into).collect(),
      output: output.into(),
      options: SourceOptions::None,
    }
  }

  pub fn with_options(mut self, options: SourceOptions) -> Self {
    self.options = options;
    self
  }
}

/// Suite-specific options carried by a [`Source`].
///
/// The suite a source declares decides which variant is valid. Built-in suites
/// get a fixed structure each; suites registered from outside the crate
/// receive the raw key/value bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SourceOptions {
  /// No options given.
  #[default]
  None,
  /// Options for the `typescript` suite.
  Typescript(TypescriptOptions),
  /// Options for the `sass` suite.
  Sass(SassOptions),
  /// Unstructured options for externally registered suites.
  Custom(BTreeMap<String, serde_json::Value>),
}

/// Options for the type-checked compile suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypescriptOptions {
  /// Compiler project file (`tsconfig.json`).
  ///
  /// When set, the project file decides which files are compiled. The
  /// source's `input` selectors do not narrow the compile; they only decide
  /// whether there is anything to compile at all.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tsconfig: Option<PathBuf>,
}

/// Options for the stylesheet compile suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct SassOptions {
  pub style: SassStyle,
  pub source_map: bool,
}

impl Default for SassOptions {
  fn default() -> Self {
    Self {
      style: SassStyle::Expanded,
      source_map: true,
    }
  }
}

/// Output style passed to the stylesheet compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SassStyle {
  #[default]
  Expanded,
  Compressed,
}

impl SassStyle {
  pub fn as_str(self) -> &'static str {
    match self {
      SassStyle::Expanded => "expanded",
      SassStyle::Compressed => "compressed",
    }
  }
}

/// A named collection of sources sharing a logical category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceGroup {
  sources: BTreeMap<String, Source>,
}

impl SourceGroup {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insert.
  pub fn with_source(mut self, name: impl Into<String>, source: Source) -> Self {
    self.insert(name, source);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, source: Source) -> Option<Source> {
    self.sources.insert(name.into(), source)
  }

  pub fn get(&self, name: &str) -> Option<&Source> {
    self.sources.get(name)
  }

  /// Sources in traversal order (sorted by name).
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Source)> {
    self.sources.iter().map(|(name, source)| (name.as_str(), source))
  }

  pub fn len(&self) -> usize {
    self.sources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sources.is_empty()
  }
}

/// All source groups known to a composition.
///
/// Groups and the sources within them are traversed in lexicographic order,
/// so the result of a name collision is the same on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceGroups {
  groups: BTreeMap<String, SourceGroup>,
}

impl SourceGroups {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_group(mut self, name: impl Into<String>, group: SourceGroup) -> Self {
    self.insert(name, group);
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, group: SourceGroup) -> Option<SourceGroup> {
    self.groups.insert(name.into(), group)
  }

  pub fn get(&self, name: &str) -> Option<&SourceGroup> {
    self.groups.get(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceGroup)> {
    self.groups.iter().map(|(name, group)| (name.as_str(), group))
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  /// Total number of sources across all groups.
  pub fn source_count(&self) -> usize {
    self.groups.values().map(SourceGroup::len).sum()
  }
}
