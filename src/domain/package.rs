//! Package domain type
//!
//! A package (barclamp) is an unpacked directory with a `crowbar.yml` at its
//! root. It is read once per operation and never modified.

use std::path::{Path, PathBuf};

use crate::common::fs::FileSystem;
use crate::config::Manifest;
use crate::error::{self, Result};

/// A package opened for install or uninstall
#[derive(Debug, Clone)]
pub struct Package {
    /// Package identifier
    pub name: String,

    /// Absolute path of the package root
    pub path: PathBuf,

    /// Parsed manifest
    pub manifest: Manifest,
}

impl Package {
    /// Open the package at `path`
    ///
    /// The name comes from `barclamp.name` in the manifest, falling back to
    /// the directory name.
    pub fn open(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.is_dir(path) {
            return Err(error::package::not_found(path.display().to_string()));
        }
        let path = dunce::canonicalize(path).map_err(|e| error::fs::read_failed(path, &e))?;
        let manifest = Manifest::load(fs, &path)?;

        let name = match manifest.barclamp.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => dir_name(&path),
        };

        Ok(Self {
            name,
            path,
            manifest,
        })
    }

    /// Last component of the package path
    pub fn dir_name(&self) -> String {
        dir_name(&self.path)
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
