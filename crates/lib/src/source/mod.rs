//! Declared sources and source groups.
//!
//! A [`Source`] is one unit of work: which suite handles it, what it reads,
//! and where it writes. Sources are collected into named [`SourceGroup`]s
//! (e.g. `main`, `test`, `client`), and all groups together form
//! [`SourceGroups`], the input to composition.

mod types;

pub use types::*;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn source_builder_collects_selectors() {
    let source = Source::new("bundle", ["./res/**/*", "./extra/*.txt"], "./build/res");
    assert_eq!(source.suite, "bundle");
    assert_eq!(source.input.len(), 2);
    assert_eq!(source.options, SourceOptions::None);
  }

  #[test]
  fn groups_iterate_in_name_order() {
    let group = SourceGroup::new()
      .with_source("typescript", Source::new("typescript", ["a"], "out"))
      .with_source("resources", Source::new("bundle", ["b"], "out"));
    let groups = SourceGroups::new()
      .with_group("test", group.clone())
      .with_group("main", group);

    let group_names: Vec<_> = groups.iter().map(|(name, _)| name).collect();
    let source_names: Vec<_> = groups.get("main").unwrap().iter().map(|(name, _)| name).collect();

    assert_eq!(group_names, vec!["main", "test"]);
    assert_eq!(source_names, vec!["resources", "typescript"]);
    assert_eq!(groups.source_count(), 4);
  }

  #[test]
  fn sass_options_default_from_empty_object() {
    let options: SassOptions = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(options, SassOptions::default());
    assert_eq!(options.style, SassStyle::Expanded);
    assert!(options.source_map);
  }

  #[test]
  fn typescript_options_reject_unknown_keys() {
    let result: Result<TypescriptOptions, _> = serde_json::from_value(serde_json::json!({ "tsconfg": "x.json" }));
    assert!(result.is_err());
  }
}
