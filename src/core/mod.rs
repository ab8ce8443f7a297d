//! Core types - pure abstractions shared across the codebase.

mod location;

pub use location::Location;
