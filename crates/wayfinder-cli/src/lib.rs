//! Wayfinder CLI library.
//!
//! Subcommand handlers and output formatting for the `wayfinder-cli` binary.

pub mod commands;
pub mod output;
