//! CLI command implementations.

pub mod args;
pub mod export;
pub mod output;

pub use args::{Cli, Commands};
pub use output::Output;
