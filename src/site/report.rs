//! Localization report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::{Stream, Style};

use crate::logger::paint;
use crate::utils::{plural_count, plural_s};

/// Summary of one localize run over the site.
#[derive(Debug, Default)]
pub struct LocalizeReport {
    /// Pages read.
    pub scanned: usize,
    /// Pages whose content changed (written unless dry), relative paths.
    pub changed: Vec<String>,
    /// Anchors whose `href` was set.
    pub rewritten: usize,
    /// Anchors carrying the attribute without a supported language.
    pub skipped: usize,
    /// Failed pages, keyed by relative path.
    pub failures: BTreeMap<String, String>,
}

impl LocalizeReport {
    pub fn add_failure(&mut self, page: String, reason: String) {
        self.failures.insert(page, reason);
    }

    pub fn changed_count(&self) -> usize {
        self.changed.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Print failed pages to stderr.
    pub fn print(&self) {
        if self.failures.is_empty() {
            return;
        }
        eprintln!();

        let count = self.failures.len();
        let dimmed = Style::new().dimmed();
        eprintln!(
            "{} {}",
            paint("failures", Style::new().red().bold(), Stream::Stderr),
            paint(format!("({count} page{})", plural_s(count)), dimmed, Stream::Stderr)
        );

        for (page, reason) in &self.failures {
            eprintln!(
                "{}{}{}",
                paint("[", dimmed, Stream::Stderr),
                paint(page, Style::new().cyan(), Stream::Stderr),
                paint("]", dimmed, Stream::Stderr)
            );
            eprintln!("{} {}", paint("→", Style::new().red(), Stream::Stderr), reason);
        }
    }
}

impl fmt::Display for LocalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed of {}, {} rewritten",
            plural_count(self.changed_count(), "page"),
            self.scanned,
            plural_count(self.rewritten, "link"),
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if self.has_failures() {
            write!(
                f,
                ", {}",
                paint(
                    format!("{} failed", self.failure_count()),
                    Style::new().red().bold(),
                    Stream::Stdout
                )
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_summary() {
        owo_colors::set_override(false);
        let mut report = LocalizeReport {
            scanned: 3,
            changed: vec!["index.html".into()],
            rewritten: 2,
            skipped: 1,
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "1 page changed of 3, 2 links rewritten, 1 skipped"
        );

        report.add_failure("bad.html".into(), "invalid utf-8".into());
        assert!(report.has_failures());
        assert_eq!(
            report.to_string(),
            "1 page changed of 3, 2 links rewritten, 1 skipped, 1 failed"
        );
    }
}
