mod init;
mod list;
mod run;

pub use init::cmd_init;
pub use list::cmd_list;
pub use run::cmd_run;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use taskweave_lib::compose::{Composer, GenerateReport};
use taskweave_lib::config::{ProjectConfig, config_path, project_root};

/// A configuration that has been loaded and composed.
pub struct Composed {
  pub path: PathBuf,
  pub composer: Composer,
  pub report: GenerateReport,
}

/// Load the configuration file and generate its tasks.
pub fn compose(explicit: Option<&Path>) -> Result<Composed> {
  let path = config_path(explicit);
  let config = ProjectConfig::load(&path)?;

  let mut composer = config
    .composer(&project_root(&path))
    .with_context(|| format!("invalid configuration in {}", path.display()))?;
  let report = composer
    .generate()
    .with_context(|| format!("failed to generate tasks from {}", path.display()))?;

  Ok(Composed { path, composer, report })
}
