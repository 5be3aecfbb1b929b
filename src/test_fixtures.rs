//! Test fixtures and utilities for reducing test setup duplication.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_host, create_package};
//!
//! #[test]
//! fn my_test() {
//!     // Staged host tree: <temp>/opt/dell as base, <temp>/root as root
//!     let (temp, settings) = create_host();
//!
//!     // Package directory with a crowbar.yml
//!     let package = create_package(&temp, "dns", "crowbar:\n  layout: 2\n");
//! }
//! ```

#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Settings;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a staged host tree and settings pointing at it.
///
/// The base directory (`<temp>/opt/dell`) and root (`<temp>/root`) both
/// exist; nothing below them does.
///
/// # Panics
///
/// Panics if the directories cannot be created.
#[must_use]
pub fn create_host() -> (TempDir, Settings) {
    let temp = create_temp_dir();
    let base = temp.path().join("opt").join("dell");
    let root = temp.path().join("root");
    std::fs::create_dir_all(&base).expect("Failed to create base directory");
    std::fs::create_dir_all(&root).expect("Failed to create root directory");
    let settings = Settings::new(base).with_root(root);
    (temp, settings)
}

/// Create a package directory `<temp>/packages/<name>` holding `manifest` as crowbar.yml.
///
/// # Panics
///
/// Panics if the package cannot be written.
#[must_use]
pub fn create_package(temp: &TempDir, name: &str, manifest: &str) -> PathBuf {
    let path = temp.path().join("packages").join(name);
    std::fs::create_dir_all(&path).expect("Failed to create package directory");
    std::fs::write(path.join("crowbar.yml"), manifest).expect("Failed to write crowbar.yml");
    path
}

/// Create test files below `root`.
///
/// Takes a list of (path, content) tuples and creates those files along
/// with any missing parent directories.
///
/// # Panics
///
/// Panics if any file cannot be written.
pub fn create_test_files(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }
}

/// Write an executable shell script.
///
/// # Panics
///
/// Panics if the script cannot be written.
pub fn write_script(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod script");
}

/// Permission bits of a path
///
/// # Panics
///
/// Panics if the path has no metadata.
#[must_use]
pub fn mode_of(path: &Path) -> u32 {
    std::fs::metadata(path)
        .expect("Failed to stat path")
        .permissions()
        .mode()
        & 0o777
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_host() {
        let (temp, settings) = create_host();
        assert!(settings.base_dir.is_dir());
        assert!(settings.root_dir.is_dir());
        assert!(settings.base_dir.starts_with(temp.path()));
    }

    #[test]
    fn test_create_package() {
        let temp = create_temp_dir();
        let path = create_package(&temp, "dns", "crowbar:\n  layout: 2\n");
        assert!(path.join("crowbar.yml").is_file());
    }

    #[test]
    fn test_create_test_files() {
        let temp = create_temp_dir();
        create_test_files(
            temp.path(),
            &[("bin/tool", "#!/bin/sh"), ("doc/readme.md", "# Readme")],
        );

        assert!(temp.path().join("bin/tool").exists());
        let content =
            std::fs::read_to_string(temp.path().join("doc/readme.md")).expect("Failed to read");
        assert_eq!(content, "# Readme");
    }

    #[test]
    fn test_write_script_is_executable() {
        let temp = create_temp_dir();
        let script = temp.path().join("setup/10-a.install");
        write_script(&script, "exit 0");
        assert_eq!(mode_of(&script), 0o755);
    }
}
