//! Terminal front end: reads commands, validates input, drives the ledger,
//! and renders the results.

pub mod commands;
pub mod context;
pub mod help;
pub mod input;
pub mod output;
pub mod registry;
mod shell;
pub mod view;

pub use context::{CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
