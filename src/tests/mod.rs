//! Crate-level test suites
//!
//! Unit tests live next to the code; these exercise the public API across
//! modules.
#![allow(clippy::unwrap_used, reason = "Standard test relaxations")]

mod canonical_tests;
mod display_tests;
mod matrix_tests;
mod parser_tests;
mod property_tests;
