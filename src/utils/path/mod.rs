//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`, `is_html_file`)

pub mod fs;

pub use fs::{is_html_file, normalize_path, resolve_path};
