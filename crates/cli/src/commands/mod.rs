//! Subcommand implementations

pub mod analyze;
pub mod generate;
pub mod input;
pub mod order;
pub mod validate;
