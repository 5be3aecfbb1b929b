//! Ordered list merging for shared host artifacts
//!
//! Packages cooperatively edit a host-owned ordered list (the framework's
//! `application.sass` import list). Each package manages two kinds of lines:
//!
//! - **Removals**: literal lines listed under `application_sass.remove` in the
//!   manifest. Installing takes them out; uninstalling puts them back.
//! - **Additions**: one `@import <name>` line per stylesheet partial
//!   `_<name>.sass` the package ships. Installing adds them; uninstalling
//!   deletes them.
//!
//! ## Insertion position
//!
//! With `add: top` new lines go right after the `// top of import list`
//! sentinel (or at index 4 when the sentinel is missing). The index is
//! computed once per merge and held, so each new line pushes the previous
//! ones down:
//!
//! ```text
//! Before:               Install {A, B} at top:
//! // top of import list // top of import list
//! @import base          @import B
//!                       @import A
//!                       @import base
//! ```
//!
//! Otherwise lines are appended at the end.
//!
//! ## Reversibility
//!
//! Installing then uninstalling the same additions restores the original
//! list. Removed lines are re-inserted at the insertion position rather than
//! where they were, so they only return to their old place when that was the
//! insertion position to begin with.

use std::path::Path;

use tracing::debug;
use wax::{CandidatePath, Glob, Pattern};

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::{self, BarclampError, Result};

use super::permissions::framework_permissions;

/// Line after which top insertions go
pub const TOP_SENTINEL: &str = "// top of import list";

/// Sentinel index assumed when the sentinel line is missing
pub const TOP_FALLBACK_INDEX: usize = 3;

/// Stylesheet partials a package contributes
const PARTIAL_PATTERN: &str = "_*.sass";

/// Where new lines are inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Append at the end
    #[default]
    End,
    /// Insert right after the sentinel line
    Top,
}

/// Whether the package is being installed or removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    Install,
    Uninstall,
}

/// Compute the merged list
///
/// Lines that are already in the wanted state are left alone, so merging
/// twice in the same direction is a no-op.
pub fn merge(
    lines: &[String],
    removals: &[String],
    additions: &[String],
    position: InsertPosition,
    direction: MergeDirection,
) -> Vec<String> {
    let mut merged = lines.to_vec();
    let top = match position {
        InsertPosition::Top => Some(
            merged
                .iter()
                .position(|line| line == TOP_SENTINEL)
                .unwrap_or(TOP_FALLBACK_INDEX)
                + 1,
        ),
        InsertPosition::End => None,
    };

    for item in removals {
        let present = merged.contains(item);
        match direction {
            MergeDirection::Install if present => {
                merged.retain(|line| line != item);
                debug!("removing '{item}' based on package manifest");
            }
            MergeDirection::Uninstall if !present => {
                insert_at(&mut merged, top, item.clone());
                debug!("restoring '{item}' based on package manifest at {top:?}");
            }
            _ => {}
        }
    }

    for entry in additions {
        match direction {
            MergeDirection::Install => {
                if !merged.contains(entry) {
                    insert_at(&mut merged, top, entry.clone());
                    debug!("adding '{entry}' at {top:?}");
                }
            }
            MergeDirection::Uninstall => {
                merged.retain(|line| line != entry);
                debug!("removing '{entry}'");
            }
        }
    }

    merged
}

fn insert_at(lines: &mut Vec<String>, index: Option<usize>, item: String) {
    match index {
        Some(index) => lines.insert(index.min(lines.len()), item),
        None => lines.push(item),
    }
}

/// `@import` lines for the stylesheet partials among `file_names`
pub fn import_entries<S: AsRef<str>>(file_names: &[S]) -> Result<Vec<String>> {
    let glob = Glob::new(PARTIAL_PATTERN).map_err(|e| BarclampError::ConfigInvalid {
        message: format!("invalid pattern '{PARTIAL_PATTERN}': {e}"),
    })?;

    Ok(file_names
        .iter()
        .filter_map(|name| {
            let candidate = CandidatePath::from(name.as_ref());
            glob.matched(&candidate)
                .and_then(|matched| matched.get(1).map(|partial| format!("@import {partial}")))
        })
        .collect())
}

/// Apply a package's stylesheet directives to the framework's `application.sass`
///
/// Skipped when either the host stylesheet or the package's stylesheet
/// directory is missing.
pub fn merge_stylesheet(
    fs: &dyn FileSystem,
    settings: &Settings,
    package: &Package,
    direction: MergeDirection,
) -> Result<()> {
    let application_sass = settings.application_sass();
    let sass_dir = package
        .path
        .join("crowbar_framework")
        .join("app")
        .join("assets")
        .join("stylesheets");

    if !fs.exists(&application_sass) || !fs.exists(&sass_dir) {
        debug!(
            "skipping application sass update, {} not found",
            application_sass.display()
        );
        return Ok(());
    }

    let partials = fs
        .entries(&sass_dir)
        .map_err(|e| error::fs::read_failed(&sass_dir, &e))?;
    let partials: Vec<&str> = partials.iter().filter_map(|name| name.to_str()).collect();
    let additions = import_entries(&partials)?;

    let lines = read_lines(fs, &application_sass)?;
    let position = if package.manifest.stylesheet_at_top() {
        InsertPosition::Top
    } else {
        InsertPosition::End
    };
    let merged = merge(
        &lines,
        package.manifest.stylesheet_removals(),
        &additions,
        position,
        direction,
    );
    write_lines(fs, &application_sass, &merged)?;

    framework_permissions(fs, settings)?;
    debug!("updated {}", application_sass.display());
    Ok(())
}

fn read_lines(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>> {
    let content = fs
        .read_to_string(path)
        .map_err(|e| error::fs::read_failed(path, &e))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn write_lines(fs: &dyn FileSystem, path: &Path, lines: &[String]) -> Result<()> {
    let content: String = lines.iter().map(|line| format!("{line}\n")).collect();
    fs.write(path, content.as_bytes())
        .map_err(|e| error::fs::write_failed(path, &e))
}
