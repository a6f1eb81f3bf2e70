use std::time::Duration;

use tokio::time::{sleep, timeout};

use super::common::{BUNDLE_CONFIG, Project};

const WAIT: Duration = Duration::from_secs(10);

async fn wait_for(project: &Project, relative: &str) {
  timeout(WAIT, async {
    while !project.exists(relative) {
      sleep(Duration::from_millis(25)).await;
    }
  })
  .await
  .unwrap_or_else(|_| panic!("{relative} never appeared"));
}

#[tokio::test(flavor = "multi_thread")]
async fn watch_rebuilds_after_change() {
  let project = Project::new(BUNDLE_CONFIG);
  project.write("src/main/resources/stale.txt", "old");
  project.write("build/bundle/main/resources/stale.txt", "old");
  let runner = project.runner();
  let watch = runner.get("watchMainResources").unwrap().clone();

  let handle = tokio::spawn(async move { watch.run().await });
  // Give the OS watcher a moment to register.
  sleep(Duration::from_millis(200)).await;

  std::fs::remove_file(project.path().join("src/main/resources/stale.txt")).unwrap();
  project.write("src/main/resources/fresh.txt", "new");

  wait_for(&project, "build/bundle/main/resources/fresh.txt").await;
  assert_eq!(project.read("build/bundle/main/resources/fresh.txt"), "new");

  // Clean ran first, so the removed source is gone from the output too.
  timeout(WAIT, async {
    while project.exists("build/bundle/main/resources/stale.txt") {
      sleep(Duration::from_millis(25)).await;
    }
  })
  .await
  .unwrap();

  handle.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn watch_covers_input_directory_created_later() {
  let project = Project::new(BUNDLE_CONFIG);
  assert!(!project.exists("src"));
  let runner = project.runner();
  let watch = runner.get("watchMainResources").unwrap().clone();

  let handle = tokio::spawn(async move { watch.run().await });
  sleep(Duration::from_millis(200)).await;

  // The first write can land before the watcher registers the new
  // directory, so keep touching files until a rebuild happens.
  timeout(WAIT, async {
    let mut attempt = 0;
    while !project.exists("build/bundle/main/resources/new.txt") {
      project.write("src/main/resources/new.txt", &format!("attempt {attempt}"));
      attempt += 1;
      sleep(Duration::from_millis(150)).await;
    }
  })
  .await
  .expect("watch never rebuilt after input directory was created");

  assert!(!handle.is_finished());
  handle.abort();
}
