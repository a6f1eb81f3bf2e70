//! Task naming template shared by the built-in suites.
//!
//! `task_name(verb, group, source) = verb + Capitalize(group) + Capitalize(source)`
//!
//! This template is the only source of task-name collisions across groups
//! and sources.

/// Verbs used by the built-in suites.
pub mod verbs {
  pub const COMPILE: &str = "compile";
  pub const BUNDLE: &str = "bundle";
  pub const CLEAN: &str = "clean";
  pub const WATCH: &str = "watch";
}

/// Upper-case the first character and leave the rest untouched.
pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Build a task name from a verb, a group name, and a source name.
pub fn task_name(verb: &str, group: &str, source: &str) -> String {
  format!("{verb}{}{}", capitalize(group), capitalize(source))
}
