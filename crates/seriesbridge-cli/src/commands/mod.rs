//! Subcommand implementations.

pub mod events;
pub mod map;
pub mod meetings;
