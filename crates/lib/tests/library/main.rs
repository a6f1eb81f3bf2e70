mod common;
mod composition_tests;
mod watch_tests;
