//! Baton: command line client for the Harmony maestro
//!
//! The binary lives in `main.rs`; the pieces it wires together are exposed
//! here so they can be tested without spawning a process.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod output;
pub mod resolver;
pub mod terminal;

pub use dispatcher::{Command, ContainerArgs, Dispatcher, Outcome};
pub use error::{CliError, CliResult, ExitCode};
