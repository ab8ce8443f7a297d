//! Configuration section definitions.
//!
//! Each module corresponds to a section in `langlink.toml`:
//!
//! | Module     | TOML Section   | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `build`    | `[build]`      | Built site location                    |
//! | `localize` | `[localize]`   | Languages, hint attribute, versions    |
//! | `site`     | `[site]`       | Deployment URL (path prefix)           |

mod build;
mod localize;
mod site;

pub use build::BuildSectionConfig;
pub use localize::LocalizeConfig;
pub use site::SiteSectionConfig;
