//! Bubble run CLI library.
//!
//! Subcommand handlers and output formatting for the `bubblerun` binary.

pub mod commands;
pub mod output;
