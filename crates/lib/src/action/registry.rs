use std::collections::BTreeMap;

use crate::action::Action;

/// Flat mapping of task name to [`Action`].
///
/// Filled by a single composition pass and read by the install step. Inserting
/// under an existing name replaces the earlier action.
#[derive(Debug, Default, Clone)]
pub struct ActionRegistry {
  actions: BTreeMap<String, Action>,
}

impl ActionRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an action, returning the one it replaced, if any.
  pub fn insert(&mut self, name: impl Into<String>, action: Action) -> Option<Action> {
    self.actions.insert(name.into(), action)
  }

  pub fn get(&self, name: &str) -> Option<&Action> {
    self.actions.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.actions.contains_key(name)
  }

  /// All registered names, in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.actions.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
    self.actions.iter().map(|(name, action)| (name.as_str(), action))
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  pub fn clear(&mut self) {
    self.actions.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn noop(name: &str) -> Action {
    Action::new(name, || async { Ok(()) })
  }

  #[test]
  fn insert_replaces_existing_entry() {
    let mut registry = ActionRegistry::new();
    let first = noop("build");
    let second = noop("build");

    assert!(registry.insert("build", first.clone()).is_none());
    let replaced = registry.insert("build", second.clone()).unwrap();

    assert!(replaced.same_body(&first));
    assert!(registry.get("build").unwrap().same_body(&second));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn names_are_sorted() {
    let mut registry = ActionRegistry::new();
    registry.insert("watchMainTypescript", noop("watchMainTypescript"));
    registry.insert("cleanMainTypescript", noop("cleanMainTypescript"));

    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, vec!["cleanMainTypescript", "watchMainTypescript"]);
  }

  #[test]
  fn clear_empties_registry() {
    let mut registry = ActionRegistry::new();
    registry.insert("a", noop("a"));
    registry.clear();
    assert!(registry.is_empty());
    assert!(!registry.contains("a"));
  }
}
