//! Page discovery inside the built site.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use jwalk::WalkDir;

use crate::utils::path::{is_html_file, resolve_path};

/// Collect the pages to localize, sorted and deduplicated.
///
/// With no `paths`, every page of `output` is collected. Otherwise each path
/// (relative to cwd or to `output`) must be a page or a directory inside
/// `output`. A single `-` reads the paths from stdin, one per line.
pub fn collect_pages(paths: &[PathBuf], output: &Path) -> Result<Vec<PathBuf>> {
    if !output.is_dir() {
        bail!("Output directory not found: {}", output.display());
    }

    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(sorted(collect_html_files(output)));
    }

    let mut pages = Vec::new();
    for path in &paths {
        let resolved = resolve_path(path, output);

        if !resolved.starts_with(output) {
            bail!(
                "Path is outside the output directory: {}\n  Output: {}",
                path.display(),
                output.display()
            );
        }

        if resolved.is_file() {
            if !is_html_file(&resolved) {
                bail!("Not an html page: {}", path.display());
            }
            pages.push(resolved);
        } else if resolved.is_dir() {
            pages.extend(collect_html_files(&resolved));
        } else {
            bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                output.join(path).display()
            );
        }
    }

    Ok(sorted(pages))
}

/// Read file paths from stdin, one per line
fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

fn collect_html_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| is_html_file(path))
        .collect()
}

fn sorted(mut pages: Vec<PathBuf>) -> Vec<PathBuf> {
    pages.sort();
    pages.dedup();
    pages
}
