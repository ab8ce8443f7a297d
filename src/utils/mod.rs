//! Utility modules.

pub mod html;
pub mod path;
mod plural;

pub use plural::{plural_count, plural_s};
