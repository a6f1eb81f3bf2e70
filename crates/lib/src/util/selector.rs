//! Glob selector helpers.

use std::path::{Component, Path, PathBuf};

const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Returns true if `segment` contains glob metacharacters.
pub fn is_glob(segment: &str) -> bool {
  segment.contains(GLOB_CHARS)
}

/// Reject selector syntax that the `glob` matcher would take literally.
///
/// Brace alternation (`{a,b}`) is not supported and would otherwise match
/// nothing without complaint.
pub fn check_selector(selector: &str) -> Result<(), &'static str> {
  if selector.contains(['{', '}']) {
    return Err("brace expansion is not supported, list each alternative as its own selector");
  }
  Ok(())
}

/// Join a selector onto `root` unless it is already absolute.
///
/// A leading `./` is dropped so that the result stays comparable with paths
/// reported by the filesystem watcher.
pub fn resolve_selector(root: &Path, selector: &str) -> String {
  let trimmed = selector.strip_prefix("./").unwrap_or(selector);
  if Path::new(trimmed).is_absolute() {
    trimmed.to_string()
  } else {
    root.join(trimmed).to_string_lossy().into_owned()
  }
}

/// The literal directory prefix of a selector.
///
/// Matched files keep their path relative to this base when copied or
/// compiled into an output directory. For a selector without glob characters
/// the base is the parent directory, so the file lands directly in the output.
pub fn glob_base(selector: &str) -> PathBuf {
  let mut base = PathBuf::new();
  for component in Path::new(selector).components() {
    if matches!(component, Component::Normal(segment) if is_glob(&segment.to_string_lossy())) {
      return base;
    }
    base.push(component);
  }
  base.parent().map(Path::to_path_buf).unwrap_or_default()
}
