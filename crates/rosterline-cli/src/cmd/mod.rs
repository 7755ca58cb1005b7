//! Subcommand implementations

pub mod authors;
pub mod institutions;
pub mod publications;
