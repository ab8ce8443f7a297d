//! `resolve` command: print the localized paths of one location.
//!
//! ```text
//! $ langlink resolve /v1/guide/?tab=cli#install
//! zh /v1/zh/guide/?tab=cli#install
//!
//! $ langlink resolve /v1/guide/ --json
//! {"location":"/v1/guide/","links":{"zh":"/v1/zh/guide/"}}
//! ```

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as JsonValue, json};

use super::ResolveArgs;
use crate::config::SiteConfig;
use crate::core::Location;
use crate::localize::Localizer;

/// Resolve and print the localized paths for `args.location`.
pub fn run_resolve(args: &ResolveArgs, config: &SiteConfig) -> Result<()> {
    let localizer = config
        .localize
        .localizer()
        .context("invalid localize configuration")?;
    let location = Location::parse(&args.location);
    let links = resolve_links(&localizer, &location, args.lang.as_deref())?;

    if args.json {
        println!("{}", to_json(&args.location, &links));
    } else {
        for (lang, path) in &links {
            println!("{lang} {path}");
        }
    }
    Ok(())
}

/// Localized path per language, in configured language order.
fn resolve_links(
    localizer: &Localizer,
    location: &Location,
    only: Option<&str>,
) -> Result<Vec<(String, String)>> {
    if let Some(lang) = only {
        let Some(path) = localizer.localize(location, lang) else {
            bail!(
                "unsupported language `{lang}` (supported: {})",
                localizer.languages().iter().collect::<Vec<_>>().join(", ")
            );
        };
        return Ok(vec![(lang.to_string(), path)]);
    }

    Ok(localizer
        .languages()
        .iter()
        .filter_map(|lang| {
            localizer
                .localize(location, lang)
                .map(|path| (lang.to_string(), path))
        })
        .collect())
}

fn to_json(location: &str, links: &[(String, String)]) -> JsonValue {
    let links: Map<String, JsonValue> = links
        .iter()
        .map(|(lang, path)| (lang.clone(), JsonValue::String(path.clone())))
        .collect();
    json!({ "location": location, "links": links })
}
