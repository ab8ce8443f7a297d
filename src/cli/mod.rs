//! Command-line interface module.

mod args;
pub mod localize;
pub mod resolve;

pub use args::{Cli, Commands, LocalizeArgs, ResolveArgs};
