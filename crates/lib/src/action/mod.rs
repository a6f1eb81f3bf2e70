//! Named actions and the flat action registry.
//!
//! An [`Action`] is the unit of work the composition engine produces and a
//! host executes. Actions carry a display name so that logs and task listings
//! show something meaningful instead of an anonymous closure.
//!
//! # Building actions
//!
//! - [`create_action`] - attach a literal name at the call site
//! - [`Action::new`] - the same, with name and body as separate arguments
//! - [`series`] - run several actions one after another
//!
//! # Example
//!
//! ```ignore
//! use taskweave_lib::action::create_action;
//!
//! let hello = create_action([("sayHello", || async {
//!   println!("hello");
//!   Ok(())
//! })]);
//! assert_eq!(hello.name(), "sayHello");
//! ```

mod registry;
mod types;

pub use registry::ActionRegistry;
pub use types::*;

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

/// Create an action from a single `(name, body)` entry.
///
/// The one-element array lets the name sit right next to the body at the call
/// site. Passing anything other than exactly one entry does not compile.
pub fn create_action<N, F, Fut>(definition: [(N, F); 1]) -> Action
where
  N: Into<String>,
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
  let [(name, body)] = definition;
  Action::new(name, body)
}

/// Combine `steps` into one action that runs them strictly in order.
///
/// Each step runs to completion before the next one starts. The first failing
/// step aborts the series and its error is returned.
pub fn series(name: impl Into<String>, steps: Vec<Action>) -> Action {
  let name: String = name.into();
  let steps: Arc<[Action]> = steps.into();
  let series_name = name.clone();

  Action::new(name, move || {
    let steps = Arc::clone(&steps);
    let series_name = series_name.clone();
    async move {
      for step in steps.iter() {
        debug!(series = %series_name, step = step.name(), "starting step");
        step.run().await?;
        debug!(series = %series_name, step = step.name(), "finished step");
      }
      Ok(())
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &str) -> Action {
    let log = Arc::clone(log);
    let entry = name.to_string();
    Action::new(name, move || {
      let log = Arc::clone(&log);
      let entry = entry.clone();
      async move {
        log.lock().unwrap().push(entry);
        Ok(())
      }
    })
  }

  #[test]
  fn create_action_attaches_name() {
    let action = create_action([("compileMainTypescript", || async { Ok(()) })]);
    assert_eq!(action.name(), "compileMainTypescript");
    assert_eq!(format!("{}", action), "compileMainTypescript");
    assert!(format!("{:?}", action).contains("compileMainTypescript"));
  }

  #[test]
  fn clones_share_body() {
    let a = Action::new("a", || async { Ok(()) });
    let b = a.clone();
    let c = Action::new("a", || async { Ok(()) });
    assert!(a.same_body(&b));
    assert!(!a.same_body(&c));
  }

  #[tokio::test]
  async fn action_can_run_repeatedly() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let action = recorder(&log, "tick");

    action.run().await.unwrap();
    action.run().await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["tick", "tick"]);
  }

  #[tokio::test]
  async fn series_runs_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let both = series("both", vec![recorder(&log, "clean"), recorder(&log, "compile")]);

    both.run().await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["clean", "compile"]);
  }

  #[tokio::test]
  async fn series_stops_at_first_failure() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let failing = Action::new("broken", || async {
      Err(ActionError::Failed {
        action: "broken".to_string(),
        message: "boom".to_string(),
      })
    });
    let both = series("both", vec![failing, recorder(&log, "compile")]);

    let err = both.run().await.unwrap_err();

    assert!(err.to_string().contains("boom"));
    assert!(log.lock().unwrap().is_empty());
  }
}
