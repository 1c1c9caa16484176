//! Task module tests.
