//! Subcommand implementations.

pub mod characters;
