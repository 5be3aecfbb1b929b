//! Rails engine mounting
//!
//! Packages that ship a `crowbar_engine` are not copied into the framework.
//! Instead the framework's routes and Gemfile get one line each, placed
//! right after the `engine mounts` marker.

use std::path::Path;

use tracing::{debug, warn};

use crate::common::fs::FileSystem;
use crate::common::string_utils::capitalize_words;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::{self, Result};

/// Marker text in routes.rb and Gemfile
pub const MOUNT_MARKER: &str = "engine mounts";

/// Directory that marks a package as an engine
pub const ENGINE_DIR: &str = "crowbar_engine";

/// Route line mounting the package's engine
///
/// The engine module name lowercases all but the first letter of each word.
pub fn route_line(name: &str) -> String {
    format!(
        "  mount Barclamp{}::Engine, :at => \"{}\"",
        capitalize_words(name),
        name
    )
}

/// Gemfile line pointing at the package's engine gem
pub fn gem_line(name: &str, package_path: &Path) -> String {
    format!(
        "gem \"barclamp_{name}\", :path => \"{}/{ENGINE_DIR}/barclamp_{name}\"",
        package_path.display()
    )
}

/// Insert `line` after the marker on every line that carries it
///
/// Text following the marker on the same line moves below the inserted
/// line. Returns `None` when nothing changes.
pub fn insert_after_marker(content: &str, line: &str) -> Option<String> {
    if !content.contains(MOUNT_MARKER) || content.lines().any(|existing| existing == line) {
        return None;
    }
    let replacement = format!("{MOUNT_MARKER}\n{line}");
    Some(
        content
            .split_inclusive('\n')
            .map(|existing| existing.replacen(MOUNT_MARKER, &replacement, 1))
            .collect(),
    )
}

/// Mount the package's engine in the framework routes and Gemfile
pub fn mount_engine(fs: &dyn FileSystem, settings: &Settings, package: &Package) -> Result<()> {
    let crowbar = settings.crowbar_path();
    inject(
        fs,
        &crowbar.join("config").join("routes.rb"),
        &route_line(&package.name),
    )?;
    inject(
        fs,
        &crowbar.join("Gemfile"),
        &gem_line(&package.name, &package.path),
    )
}

fn inject(fs: &dyn FileSystem, path: &Path, line: &str) -> Result<()> {
    if !fs.exists(path) {
        warn!("cannot mount engine, {} not found", path.display());
        return Ok(());
    }
    let content = fs
        .read_to_string(path)
        .map_err(|e| error::fs::read_failed(path, &e))?;
    match insert_after_marker(&content, line) {
        Some(updated) => {
            fs.write(path, updated.as_bytes())
                .map_err(|e| error::fs::write_failed(path, &e))?;
            debug!("added '{}' to {}", line.trim(), path.display());
        }
        None => debug!("{} left unchanged", path.display()),
    }
    Ok(())
}
