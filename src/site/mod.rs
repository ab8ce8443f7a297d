//! Built site localization.
//!
//! Every page of the output directory is bound to the location a browser
//! would show for it, and its language-switch anchors are rewritten in place.
//!
//! ```text
//! collect_pages ──► par_iter ──► localize_page ──► LocalizeReport
//!                                 read → Location::for_page
//!                                      → HtmlDocument → Localizer::run
//!                                      → write (if changed)
//! ```

mod collect;
mod report;

pub use collect::collect_pages;
pub use report::LocalizeReport;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::Location;
use crate::debug;
use crate::dom::HtmlDocument;
use crate::localize::Localizer;
use crate::logger::ProgressLine;

/// Result of localizing a single page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOutcome {
    pub changed: bool,
    pub rewritten: usize,
    pub skipped: usize,
}

/// Localizes pages of one output directory.
#[derive(Debug, Clone, Copy)]
pub struct SiteLocalizer<'a> {
    pub output: &'a Path,
    /// URL path the site is served under (`docs` for `https://host/docs/`).
    pub path_prefix: &'a str,
    pub localizer: &'a Localizer,
    /// Compute without writing.
    pub dry: bool,
}

impl SiteLocalizer<'_> {
    /// Localize `pages` in parallel.
    ///
    /// A failing page is recorded in the report and does not stop the others.
    pub fn run(&self, pages: &[impl AsRef<Path> + Sync], progress: Option<&ProgressLine>) -> LocalizeReport {
        let outcomes: Vec<_> = pages
            .par_iter()
            .map(|page| {
                let page = page.as_ref();
                let outcome = self.localize_page(page);
                if let Some(progress) = progress {
                    progress.inc("html");
                }
                (self.display_path(page), outcome)
            })
            .collect();

        let mut report = LocalizeReport::default();
        for (page, outcome) in outcomes {
            report.scanned += 1;
            match outcome {
                Ok(outcome) => {
                    report.rewritten += outcome.rewritten;
                    report.skipped += outcome.skipped;
                    if outcome.changed {
                        report.changed.push(page);
                    }
                }
                Err(err) => report.add_failure(page, format!("{err:#}")),
            }
        }
        report
    }

    /// Localize one page file, writing it back if its content changed.
    pub fn localize_page(&self, page: &Path) -> Result<PageOutcome> {
        let source = fs::read_to_string(page)
            .with_context(|| format!("failed to read {}", page.display()))?;

        let relative = page.strip_prefix(self.output).with_context(|| {
            format!(
                "{} is not inside {}",
                page.display(),
                self.output.display()
            )
        })?;
        let location = Location::for_page(relative, self.path_prefix);

        let mut doc = HtmlDocument::parse(&source);
        let stats = self.localizer.run(&mut doc, &location);
        let result = doc.finish();

        let changed = result.as_ref() != source;
        if changed {
            debug!("localize"; "{} at {}", relative.display(), location);
            if !self.dry {
                fs::write(page, result.as_bytes())
                    .with_context(|| format!("failed to write {}", page.display()))?;
            }
        }

        Ok(PageOutcome {
            changed,
            rewritten: stats.rewritten,
            skipped: stats.skipped,
        })
    }

    fn display_path(&self, page: &Path) -> String {
        page.strip_prefix(self.output)
            .unwrap_or(page)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
