//! One-way copy of rendered reports into the published docs tree, followed
//! by index regeneration.
//!
//! The index is a derived view: it is recomputed from the current source
//! listing on every run and fully overwritten. A report removed from the
//! source directory drops out of the index but its previously copied file
//! stays in the destination.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

/// Copy every Markdown or image report from `source_dir` into `dest_dir`
/// and regenerate the index. Returns the number of files copied.
///
/// A missing source directory, or one without matching files, is not an
/// error: nothing is copied, no index is written, and the count is 0.
pub fn sync(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create docs reports directory {dest_dir:?}"))?;

    if !source_dir.exists() {
        info!(path = %source_dir.display(), "Reports directory does not exist, nothing to copy");
        return Ok(0);
    }

    let mut copied: Vec<String> = Vec::new();
    for entry in fs::read_dir(source_dir)
        .with_context(|| format!("Failed to list reports directory {source_dir:?}"))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "md" && ext != "png" {
            continue;
        }
        fs::copy(&path, dest_dir.join(name))
            .with_context(|| format!("Failed to copy report {name}"))?;
        copied.push(name.to_string());
    }

    if copied.is_empty() {
        info!("No reports found to copy");
        return Ok(0);
    }
    copied.sort();

    let index_file = dest_dir.join("index.md");
    fs::write(&index_file, render_index(&copied))
        .with_context(|| format!("Failed to write {index_file:?}"))?;

    info!(count = copied.len(), dest = %dest_dir.display(), "Documentation updated with reports");
    Ok(copied.len())
}

/// Category of a copied report, decided by filename substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Financial,
    Social,
    Other,
}

fn categorise(filename: &str) -> Category {
    let lower = filename.to_lowercase();
    if lower.contains("funding") {
        Category::Financial
    } else if lower.contains("social") {
        Category::Social
    } else {
        Category::Other
    }
}

/// Human title for a report file: underscores become spaces, the `.md`
/// suffix goes, words are title-cased.
fn display_title(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    stem.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full index regeneration from the copied file listing. Only Markdown
/// reports are listed; images are copied alongside but not linked here.
fn render_index(copied: &[String]) -> String {
    let mut index = format!(
        "# PattesThai Project Reports\n\
         \n\
         *Last updated: {}*\n\
         \n\
         This section contains automatically generated reports about the \
         PattesThai project.\n\
         \n\
         ## Available Reports\n\n",
        Local::now().format("%d/%m/%Y %H:%M")
    );

    let sections = [
        (Category::Financial, "### Financial Reports\n\n"),
        (Category::Social, "### Social Media Reports\n\n"),
        (Category::Other, "### Other Reports\n\n"),
    ];
    for (category, heading) in sections {
        let reports: Vec<&String> = copied
            .iter()
            .filter(|f| f.ends_with(".md") && categorise(f) == category)
            .collect();
        if reports.is_empty() {
            continue;
        }
        index.push_str(heading);
        for report in reports {
            index.push_str(&format!("- [{}](./{})\n", display_title(report), report));
        }
        index.push('\n');
    }

    index.push_str(
        "## About These Reports\n\
         \n\
         All reports here are generated automatically and refreshed regularly \
         to reflect the current state of the project.\n",
    );
    index
}
