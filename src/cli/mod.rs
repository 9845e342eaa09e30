//! CLI module for taskrank - command-line interface and subcommands.
//!
//! Stands in for the request layer: reads a JSON batch, runs `analyze` or
//! `suggest`, and writes JSON (or a colored listing) to stdout.

pub mod commands;

pub use commands::Cli;
