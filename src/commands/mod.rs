//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod resolve;
pub mod run;
