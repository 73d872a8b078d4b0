//! Utilities that are used across the `access-operators` subcommands.

pub mod args;
pub mod display;
pub mod time;
