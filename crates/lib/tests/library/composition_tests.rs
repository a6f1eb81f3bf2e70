use taskweave_lib::host::RunError;

use super::common::{BUNDLE_CONFIG, Project};

#[test]
fn installs_three_tasks_per_source() {
  let project = Project::new(BUNDLE_CONFIG);
  let runner = project.runner();

  let names: Vec<_> = runner.names().collect();
  assert_eq!(
    names,
    vec![
      "bundleConfigEnv",
      "bundleMainResources",
      "cleanConfigEnv",
      "cleanMainResources",
      "watchConfigEnv",
      "watchMainResources",
    ]
  );
}

#[tokio::test]
async fn bundle_copies_relative_to_glob_base() {
  let project = Project::new(BUNDLE_CONFIG);
  project.write("src/main/resources/logo.svg", "<svg/>");
  project.write("src/main/resources/i18n/en.json", "{}");
  project.write("src/main/resources/README", "no extension, not matched");
  let runner = project.runner();

  runner.run("bundleMainResources").await.unwrap();

  assert_eq!(project.read("build/bundle/main/resources/logo.svg"), "<svg/>");
  assert_eq!(project.read("build/bundle/main/resources/i18n/en.json"), "{}");
  assert!(!project.exists("build/bundle/main/resources/README"));
}

#[tokio::test]
async fn bundle_with_literal_selectors_copies_present_files() {
  let project = Project::new(BUNDLE_CONFIG);
  project.write(".default.env", "PORT=8080");
  let runner = project.runner();

  runner.run("bundleConfigEnv").await.unwrap();

  assert_eq!(project.read("build/bundle/config/.default.env"), "PORT=8080");
  assert!(!project.exists("build/bundle/config/.env"));
}

#[tokio::test]
async fn clean_is_idempotent() {
  let project = Project::new(BUNDLE_CONFIG);
  project.write("src/main/resources/logo.svg", "<svg/>");
  let runner = project.runner();

  runner.run("bundleMainResources").await.unwrap();
  assert!(project.exists("build/bundle/main/resources"));

  runner.run("cleanMainResources").await.unwrap();
  assert!(!project.exists("build/bundle/main/resources"));

  runner.run("cleanMainResources").await.unwrap();
}

#[tokio::test]
async fn series_and_parallel_runs() {
  let project = Project::new(BUNDLE_CONFIG);
  project.write("src/main/resources/logo.svg", "<svg/>");
  project.write(".env", "SECRET=1");
  let runner = project.runner();

  runner
    .run_parallel(&["bundleMainResources".to_string(), "bundleConfigEnv".to_string()])
    .await
    .unwrap();
  assert!(project.exists("build/bundle/main/resources/logo.svg"));
  assert!(project.exists("build/bundle/config/.env"));

  runner
    .run_series(&["cleanMainResources".to_string(), "cleanConfigEnv".to_string()])
    .await
    .unwrap();
  assert!(!project.exists("build/bundle"));
}

#[tokio::test]
async fn unknown_task_runs_nothing() {
  let project = Project::new(BUNDLE_CONFIG);
  project.write("src/main/resources/logo.svg", "<svg/>");
  let runner = project.runner();

  let err = runner
    .run_series(&["bundleMainResources".to_string(), "deployEverything".to_string()])
    .await
    .unwrap_err();

  assert!(matches!(err, RunError::TaskNotFound(ref name) if name == "deployEverything"));
  assert!(!project.exists("build/bundle/main/resources"));
}

#[tokio::test]
async fn missing_compiler_fails_the_task() {
  let project = Project::new(
    r#"
[toolchain]
tsc = "taskweave-test-missing-tsc"

[groups.main.typescript]
suite = "typescript"
input = "./src/main/typescript/**/*.ts"
output = "./build/javascript/main"
"#,
  );
  project.write("src/main/typescript/app.ts", "export const x = 1;");
  let runner = project.runner();

  let err = runner.run("compileMainTypescript").await.unwrap_err();

  assert!(matches!(err, RunError::Failed { ref task, .. } if task == "compileMainTypescript"));
}
