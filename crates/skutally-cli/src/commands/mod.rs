//! CLI subcommands.

pub mod config;
pub mod count;
