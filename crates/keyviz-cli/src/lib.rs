//! keyviz CLI library
//!
//! Argument parsing, settings file resolution and the command
//! implementations behind the `keyviz` binary.

pub mod cli;
pub mod commands;
pub mod config;
