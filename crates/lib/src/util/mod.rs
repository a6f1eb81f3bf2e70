//! Shared utilities.
//!
//! Glob selector helpers and test doubles.

pub mod selector;

#[cfg(test)]
pub mod testutil;
