//! Command-line interface for the NMMS reasoner.
//!
//! Three subcommands over a JSON base file: `tell` mutates a base,
//! `ask` queries derivability, `repl` runs an interactive session.
//! Exit codes follow the grep convention: 0 success/derivable, 1 error,
//! 2 not derivable.

pub mod commands;
pub mod output;
pub mod repl;
pub mod statements;

pub use commands::{Cli, Commands, EXIT_ERROR, EXIT_NOT_DERIVABLE, EXIT_SUCCESS};
