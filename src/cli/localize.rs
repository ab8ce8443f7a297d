//! `localize` command: rewrite the language switchers of the built site.

use anyhow::{Context, Result, bail};

use super::LocalizeArgs;
use crate::config::SiteConfig;
use crate::logger::ProgressLine;
use crate::site::{SiteLocalizer, collect_pages};
use crate::utils::plural_count;
use crate::{debug, log};

/// Localize every collected page of the output directory.
pub fn localize_site(args: &LocalizeArgs, config: &SiteConfig) -> Result<()> {
    let output = config.output_dir();
    let pages = collect_pages(&args.paths, output)?;

    if pages.is_empty() {
        log!("localize"; "no pages found in {}", output.display());
        return Ok(());
    }

    let localizer = config
        .localize
        .localizer()
        .context("invalid localize configuration")?;

    debug!(
        "localize"; "languages: {}, attribute: {}, prefix: `{}`",
        localizer.languages().iter().collect::<Vec<_>>().join(", "),
        localizer.attribute(),
        config.build.path_prefix
    );

    let site = SiteLocalizer {
        output,
        path_prefix: &config.build.path_prefix,
        localizer: &localizer,
        dry: args.dry,
    };

    let progress = ProgressLine::new(&[("html", pages.len())]);
    let report = site.run(&pages, Some(&progress));
    progress.finish();

    if args.dry {
        for page in &report.changed {
            log!("localize"; "would change {}", page);
        }
    }

    log!("localize"; "{}", report);
    report.print();

    if report.has_failures() {
        bail!(
            "localize failed: {} of {}",
            plural_count(report.failure_count(), "page"),
            report.scanned
        );
    }

    Ok(())
}
