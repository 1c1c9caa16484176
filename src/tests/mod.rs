//! Internal tests, grouped by module.

mod cli;
mod error;
mod task;
