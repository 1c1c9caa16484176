//! Error module tests.

mod display_tests;
