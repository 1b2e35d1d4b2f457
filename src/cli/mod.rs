//! CLI module for rollbook
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP record service
//! - list / add / edit / delete: Terminal client against a running service

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs, ServerArgs, StudentArgs, DEFAULT_SERVER};
pub use commands::{add, delete, edit, list, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{confirm, confirm_from};
