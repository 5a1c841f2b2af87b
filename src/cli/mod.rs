//! CLI module for taskplanner - command-line interface and subcommands.
//!
//! Each subcommand maps onto one task store operation; `list` and `stats`
//! render the derived views.

pub mod commands;

pub use commands::Cli;
