//! Implementation of the `weave init` command.

use std::path::Path;

use anyhow::{Context, Result};

use taskweave_lib::consts::APP_NAME;
use taskweave_lib::init::init_config;

use crate::output::{Tone, status};

/// Write a starter `weave.toml` into `dir`.
pub fn cmd_init(dir: &Path, force: bool) -> Result<()> {
  let path = init_config(dir, force).context("Failed to initialize configuration")?;

  status(Tone::Done, &format!("Initialized {APP_NAME} configuration at {}", path.display()));
  println!();
  println!("Next steps:");
  println!("  1. Edit {} to match your source layout", path.display());
  println!("  2. Run: weave list");

  Ok(())
}
