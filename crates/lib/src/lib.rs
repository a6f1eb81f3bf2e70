//! taskweave-lib: Core types and logic for taskweave
//!
//! This crate expands a declarative description of a project's build inputs
//! into a flat registry of named, runnable tasks:
//! - `Source` / `SourceGroups`: what to build, grouped by category
//! - `Suite`: a strategy turning one source into named actions
//! - `Composer`: runs every source through its suite and merges the results
//! - `Action`: a named asynchronous unit of work
//! - `Pipeline` / `TaskHost`: the seams to the filesystem, the toolchain and
//!   whatever runs the tasks

pub mod action;
pub mod compose;
pub mod config;
pub mod consts;
pub mod host;
pub mod init;
pub mod source;
pub mod suite;
pub mod util;
