//! Subcommand implementations

pub mod iris;
pub mod quakes;
