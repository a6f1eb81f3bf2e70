use std::path::Path;

use taskweave_lib::config::ProjectConfig;
use taskweave_lib::host::TaskRunner;
use tempfile::TempDir;

/// A project directory with a config file and some source files.
pub struct Project {
  pub dir: TempDir,
}

impl Project {
  pub fn new(config: &str) -> Self {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("weave.toml"), config).unwrap();
    Self { dir }
  }

  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  pub fn write(&self, relative: &str, content: &str) {
    let path = self.dir.path().join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  pub fn read(&self, relative: &str) -> String {
    std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
  }

  pub fn exists(&self, relative: &str) -> bool {
    self.dir.path().join(relative).exists()
  }

  /// Load the config, compose it, and install the tasks into a runner.
  pub fn runner(&self) -> TaskRunner {
    let config = ProjectConfig::load(&self.dir.path().join("weave.toml")).unwrap();
    let mut composer = config.composer(self.dir.path()).unwrap();
    composer.generate().unwrap();

    let mut runner = TaskRunner::new();
    composer.install(&mut runner).unwrap();
    runner
  }
}

pub const BUNDLE_CONFIG: &str = r#"
[toolchain]
debounce_ms = 20

[groups.main.resources]
suite = "bundle"
input = "./src/main/resources/**/*.*"
output = "./build/bundle/main/resources"

[groups.config.env]
suite = "bundle"
input = [".env", ".default.env"]
output = "./build/bundle/config"
"#;
