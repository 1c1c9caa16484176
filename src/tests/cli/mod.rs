//! CLI module tests.

#[cfg(feature = "sarge")]
mod sarge_tests;
